//! YAML data catalogue.
//!
//! The catalogue is loaded once at process start and passed by reference to
//! everything that needs it.

use crate::{AcquireError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Catalogue file looked up in the working directory when no path is given.
pub const DEFAULT_CATALOGUE_PATH: &str = "data_catalogue.yml";

/// Category holding the raw downloadable inputs.
pub const INPUTS_CATEGORY: &str = "inputs";

/// One dataset in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogueEntry {
    /// Remote archive URL, if the dataset can be downloaded.
    #[serde(default)]
    pub url: Option<String>,
    /// Local path of the zip archive (downloaded or pre-staged).
    pub zip_folder: PathBuf,
    /// Directory the archive is extracted into.
    pub location: PathBuf,
    /// File expected in `location` once acquisition is complete.
    pub file_name: String,
}

impl CatalogueEntry {
    /// Path of the file this entry should produce.
    pub fn target_path(&self) -> PathBuf {
        self.location.join(&self.file_name)
    }
}

/// Datasets keyed by category, then by dataset name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Catalogue {
    categories: BTreeMap<String, BTreeMap<String, CatalogueEntry>>,
}

impl Catalogue {
    /// Read and parse a catalogue file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| AcquireError::CatalogueRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| AcquireError::CatalogueParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a catalogue from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|source| AcquireError::CatalogueParse {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    /// All datasets in a category, ordered by name.
    pub fn category(&self, category: &str) -> Result<&BTreeMap<String, CatalogueEntry>> {
        self.categories
            .get(category)
            .ok_or_else(|| AcquireError::MissingCatalogueKey {
                key: category.to_string(),
            })
    }

    /// Look up a single dataset.
    pub fn entry(&self, category: &str, name: &str) -> Result<&CatalogueEntry> {
        self.category(category)?
            .get(name)
            .ok_or_else(|| AcquireError::MissingCatalogueKey {
                key: format!("{}.{}", category, name),
            })
    }

    /// Category names, ordered.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }
}
