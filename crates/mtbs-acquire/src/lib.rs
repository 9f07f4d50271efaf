//! # mtbs-acquire
//!
//! Catalogue-driven acquisition of the MTBS (Monitoring Trends in Burn Severity)
//! wildfire perimeter dataset.
//!
//! This crate provides:
//! - A YAML data catalogue describing where each dataset lives and how to obtain it
//! - An HTTP fetcher that downloads an archive to disk
//! - A zip extractor that expands an archive into a directory
//! - An orchestrator that skips, extracts, or downloads depending on what is on disk
//! - A verifier that gates downstream use on the expected file being present
//!
//! ## Overview
//!
//! ### Data Catalogue
//!
//! The catalogue is a nested mapping keyed by category and then dataset name:
//!
//! ```yaml
//! inputs:
//!   wildfires:
//!     url: https://example.org/mtbs_perimeter_data.zip
//!     zip_folder: data/inputs/mtbs_wildfires.zip
//!     location: data/inputs
//!     file_name: mtbs_perims_DD.shp
//! ```
//!
//! ### Acquisition Policy
//!
//! For each entry, in order:
//! 1. The expected file already exists: nothing to do
//! 2. The archive exists locally: extract it
//! 3. A URL is configured: download the archive, then extract it
//! 4. Otherwise: configuration error
//!
//! ## Examples
//!
//! ```no_run
//! use mtbs_acquire::{Catalogue, HttpFetcher, ensure_available, verify};
//!
//! let catalogue = Catalogue::load("data_catalogue.yml")?;
//! let entry = catalogue.entry("inputs", "wildfires")?;
//!
//! let fetcher = HttpFetcher::new()?;
//! let outcome = ensure_available("wildfires", entry, &fetcher)?;
//! println!("{}", outcome);
//!
//! let path = verify(&entry.location, &entry.file_name)?;
//! println!("Input ready at {}", path.display());
//! # Ok::<(), mtbs_acquire::AcquireError>(())
//! ```

mod acquire;
mod catalogue;
mod error;
mod extract;
mod fetch;
mod verify;

pub use acquire::{ensure_all, ensure_available, Acquisition};
pub use catalogue::{Catalogue, CatalogueEntry, DEFAULT_CATALOGUE_PATH, INPUTS_CATEGORY};
pub use error::AcquireError;
pub use extract::extract;
pub use fetch::{DownloadStats, Fetch, HttpFetcher};
pub use verify::verify;

/// Result type for acquisition operations.
pub type Result<T> = std::result::Result<T, AcquireError>;
