//! Zip archive extraction.

use crate::{AcquireError, Result};
use std::fs;
use std::path::Path;
use tracing::info;
use zip::ZipArchive;

/// Expand every entry of `archive_path` into `destination`.
///
/// Creates `destination` if it does not exist. Returns the number of entries
/// in the archive.
pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(archive_path: P, destination: Q) -> Result<usize> {
    let archive_path = archive_path.as_ref();
    let destination = destination.as_ref();

    if !archive_path.is_file() {
        return Err(AcquireError::ArchiveNotFound(archive_path.to_path_buf()));
    }

    info!(
        "Extracting {} to {}",
        archive_path.display(),
        destination.display()
    );
    fs::create_dir_all(destination)?;

    let file = fs::File::open(archive_path)?;
    let into_extraction_error = |source| AcquireError::Extraction {
        path: archive_path.to_path_buf(),
        source,
    };
    let mut archive = ZipArchive::new(file).map_err(into_extraction_error)?;
    let entries = archive.len();
    archive.extract(destination).map_err(into_extraction_error)?;

    info!("Extracted {} entries from {}", entries, archive_path.display());
    Ok(entries)
}
