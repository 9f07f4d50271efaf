//! Command implementations behind the `mtbs` binary.
//!
//! - [`download`] acquires every catalogue input (or one dataset)
//! - [`check`] verifies that a dataset's expected file is on disk
//! - [`clean`] loads the wildfire perimeters and applies the cleaning steps

pub mod clean;
pub mod download;

use thiserror::Error;

pub use clean::{run_clean, CleanConfig, CleanReport};
pub use download::{run_check, run_download, DownloadConfig};

/// Errors surfaced by the runner commands.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Catalogue, acquisition or verification failure.
    #[error(transparent)]
    Acquire(#[from] mtbs_acquire::AcquireError),

    /// Shapefile read or transform failure.
    #[error(transparent)]
    Frame(#[from] mtbs_frame::FrameError),

    /// Filesystem error, e.g. while writing the report.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Report could not be serialized.
    #[error("Failed to write report: {0}")]
    Report(#[from] serde_json::Error),
}

impl RunnerError {
    /// Process exit code for this error.
    ///
    /// Catalogue problems exit with 2 so scripts can tell them apart from
    /// missing data or network failures (1).
    pub fn exit_code(&self) -> i32 {
        match self {
            RunnerError::Acquire(e) if e.is_configuration() => 2,
            _ => 1,
        }
    }
}
