//! Input presence check.

use crate::{AcquireError, Result};
use std::path::{Path, PathBuf};

/// Check that `folder/file_name` exists and return the composed path.
pub fn verify<P: AsRef<Path>>(folder: P, file_name: &str) -> Result<PathBuf> {
    let path = folder.as_ref().join(file_name);
    if path.exists() {
        Ok(path)
    } else {
        Err(AcquireError::MissingInput(path))
    }
}
