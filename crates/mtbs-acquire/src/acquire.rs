//! Acquisition orchestration.
//!
//! Decides from local filesystem state whether a dataset needs nothing,
//! an extraction, or a download followed by an extraction. This is the one
//! place where fetch/extract/verify failures are turned into a single
//! actionable error for the user.

use crate::{extract, verify, AcquireError, Catalogue, CatalogueEntry, Fetch, Result};
use std::fmt;
use std::fs;
use tracing::{info, warn};

/// What `ensure_available` had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    /// The expected file was already on disk.
    AlreadyPresent,
    /// A local archive was extracted.
    Extracted {
        /// Number of archive entries written.
        entries: usize,
    },
    /// The archive was downloaded and then extracted.
    Downloaded {
        /// Size of the downloaded archive.
        bytes: u64,
        /// Number of archive entries written.
        entries: usize,
    },
}

impl fmt::Display for Acquisition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Acquisition::AlreadyPresent => write!(f, "already present"),
            Acquisition::Extracted { entries } => {
                write!(f, "extracted {} entries from local archive", entries)
            }
            Acquisition::Downloaded { bytes, entries } => {
                write!(f, "downloaded {} bytes and extracted {} entries", bytes, entries)
            }
        }
    }
}

/// Make sure the file described by `entry` exists locally.
///
/// Policy, in order: already present, extract the local archive, download
/// then extract, or fail because the catalogue gives no way to get the data.
/// Repeated calls after a success are no-ops.
pub fn ensure_available<F: Fetch + ?Sized>(
    dataset: &str,
    entry: &CatalogueEntry,
    fetcher: &F,
) -> Result<Acquisition> {
    let target = entry.target_path();

    if target.exists() {
        info!("{} is already downloaded in {}", entry.file_name, entry.location.display());
        return Ok(Acquisition::AlreadyPresent);
    }

    let acquisition = if entry.zip_folder.exists() {
        info!("Extracting {} from {}", dataset, entry.zip_folder.display());
        extract(&entry.zip_folder, &entry.location)
            .map(|entries| Acquisition::Extracted { entries })
    } else if let Some(url) = entry.url.as_deref() {
        info!("Downloading and extracting {} from {}", dataset, url);
        download_and_extract(url, entry, fetcher)
    } else {
        return Err(AcquireError::NoAcquisitionPath {
            dataset: dataset.to_string(),
            archive: entry.zip_folder.clone(),
        });
    };

    acquisition
        .and_then(|acquisition| {
            verify(&entry.location, &entry.file_name)?;
            Ok(acquisition)
        })
        .map_err(|source| AcquireError::Acquisition {
            dataset: dataset.to_string(),
            target,
            source: Box::new(source),
        })
}

fn download_and_extract<F: Fetch + ?Sized>(
    url: &str,
    entry: &CatalogueEntry,
    fetcher: &F,
) -> Result<Acquisition> {
    fs::create_dir_all(&entry.location)?;
    let bytes = fetcher.fetch(url, &entry.zip_folder)?;

    let unpacked = extract(&entry.zip_folder, &entry.location).and_then(|entries| {
        verify(&entry.location, &entry.file_name)?;
        Ok(entries)
    });

    match unpacked {
        Ok(entries) => Ok(Acquisition::Downloaded { bytes, entries }),
        Err(e) => {
            // Drop the archive so the next run downloads again.
            warn!("Removing unusable download {}", entry.zip_folder.display());
            if let Err(remove_err) = fs::remove_file(&entry.zip_folder) {
                warn!("Failed to remove {}: {}", entry.zip_folder.display(), remove_err);
            }
            Err(e)
        }
    }
}

/// Run [`ensure_available`] for every dataset in a catalogue category.
///
/// Datasets are processed in name order; the first failure stops the run.
pub fn ensure_all<F: Fetch + ?Sized>(
    catalogue: &Catalogue,
    category: &str,
    fetcher: &F,
) -> Result<Vec<(String, Acquisition)>> {
    let entries = catalogue.category(category)?;
    let mut results = Vec::with_capacity(entries.len());

    for (name, entry) in entries {
        info!("Accessing information for {} input", name);
        let acquisition = ensure_available(name, entry, fetcher)?;
        results.push((name.clone(), acquisition));
    }

    Ok(results)
}
