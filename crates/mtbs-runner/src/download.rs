//! `mtbs download` and `mtbs check`.

use crate::RunnerError;
use mtbs_acquire::{ensure_all, ensure_available, verify, Acquisition, Catalogue, Fetch, INPUTS_CATEGORY};
use std::path::PathBuf;
use tracing::info;

/// Configuration for a download run.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Catalogue category to acquire.
    pub category: String,
    /// Single dataset to acquire (None for the whole category).
    pub dataset: Option<String>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            category: INPUTS_CATEGORY.to_string(),
            dataset: None,
        }
    }
}

/// Acquire the configured datasets.
///
/// Returns what was done for each dataset, in processing order.
pub fn run_download<F: Fetch + ?Sized>(
    catalogue: &Catalogue,
    config: &DownloadConfig,
    fetcher: &F,
) -> Result<Vec<(String, Acquisition)>, RunnerError> {
    let results = match &config.dataset {
        Some(name) => {
            let entry = catalogue.entry(&config.category, name)?;
            vec![(name.clone(), ensure_available(name, entry, fetcher)?)]
        }
        None => ensure_all(catalogue, &config.category, fetcher)?,
    };

    for (name, acquisition) in &results {
        info!("{}: {}", name, acquisition);
    }

    Ok(results)
}

/// Verify that one dataset's expected file is present.
pub fn run_check(catalogue: &Catalogue, category: &str, dataset: &str) -> Result<PathBuf, RunnerError> {
    let entry = catalogue.entry(category, dataset)?;
    let path = verify(&entry.location, &entry.file_name)?;
    info!("{} is present at {}", dataset, path.display());
    Ok(path)
}
