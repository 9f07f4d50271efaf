//! Error types for the table crate.

use thiserror::Error;

/// Errors that can occur when reading or transforming a dataset.
#[derive(Debug, Error)]
pub enum FrameError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Shapefile geometry could not be read.
    #[error("Shapefile error: {0}")]
    Shapefile(#[from] shapefile::Error),

    /// Attribute table could not be read.
    #[error("Attribute table error: {0}")]
    Dbase(#[from] shapefile::dbase::Error),

    /// Shape type other than polygon or null.
    #[error("Unsupported shape type: {0}")]
    UnsupportedShape(String),

    /// A transform referred to a column the dataset does not have.
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// A numeric transform found a non-numeric cell.
    #[error("Column '{column}' has a non-numeric value at row {row}: {value}")]
    NonNumeric {
        /// Column name.
        column: String,
        /// Zero-based row index.
        row: usize,
        /// Offending value, rendered for display.
        value: String,
    },

    /// A row does not have one value per column.
    #[error("Row has {found} values but the dataset has {expected} columns")]
    RowLength {
        /// Number of columns.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },
}
