//! Error types for the acquisition crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the catalogue or acquiring data.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalogue file could not be read.
    #[error("Cannot read data catalogue {path}: {source}")]
    CatalogueRead {
        /// Catalogue path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The catalogue file is not valid YAML for the expected schema.
    #[error("Malformed data catalogue {path}: {source}")]
    CatalogueParse {
        /// Catalogue path.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// A category or dataset is not present in the catalogue.
    #[error("Data catalogue has no entry '{key}'")]
    MissingCatalogueKey {
        /// Dotted key that was looked up, e.g. `inputs.wildfires`.
        key: String,
    },

    /// Neither the expected file, the archive, nor a URL is available.
    #[error("Invalid paths specified in data catalogue for '{dataset}': {archive} does not exist and no url is configured")]
    NoAcquisitionPath {
        /// Dataset name.
        dataset: String,
        /// Archive path that was checked.
        archive: PathBuf,
    },

    /// The archive to extract does not exist.
    #[error("The archive '{0}' does not exist")]
    ArchiveNotFound(PathBuf),

    /// A required input file is missing.
    #[error("The file path \"{0}\" does not exist. Please run `mtbs download` to download required data")]
    MissingInput(PathBuf),

    /// HTTP client error (connection, TLS, invalid URL).
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with something other than 200 OK.
    #[error("Failed to download {url}: HTTP {status}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },

    /// The archive is corrupt or could not be expanded.
    #[error("Failed to extract {path}: {source}")]
    Extraction {
        /// Archive path.
        path: PathBuf,
        /// Underlying zip error.
        source: zip::result::ZipError,
    },

    /// Acquisition of a dataset failed.
    #[error("Could not acquire '{dataset}' ({target}): {source}. Fix the cause and re-run `mtbs download`")]
    Acquisition {
        /// Dataset name.
        dataset: String,
        /// File that acquisition was meant to produce.
        target: PathBuf,
        /// The failure that stopped acquisition.
        source: Box<AcquireError>,
    },
}

impl AcquireError {
    /// Returns `true` for errors caused by the catalogue rather than the environment.
    pub fn is_configuration(&self) -> bool {
        match self {
            AcquireError::CatalogueRead { .. }
            | AcquireError::CatalogueParse { .. }
            | AcquireError::MissingCatalogueKey { .. }
            | AcquireError::NoAcquisitionPath { .. } => true,
            AcquireError::Acquisition { source, .. } => source.is_configuration(),
            _ => false,
        }
    }
}
