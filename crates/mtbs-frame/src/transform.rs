//! Cleaning transforms.
//!
//! Every function here borrows a [`Dataset`] and returns a new one; the input
//! is never modified.

use crate::{Dataset, FrameError, Result, Value, GEOMETRY_COLUMN};
use geo::Area;
use std::collections::HashSet;
use tracing::info;

/// Column holding the MTBS event identifier.
pub const EVENT_ID_COLUMN: &str = "Event_ID";

/// Column added by [`derive_region_code`].
pub const STATE_COLUMN: &str = "state";

/// Column added by [`derive_area`].
pub const AREA_COLUMN: &str = "area";

/// Number of leading `Event_ID` characters that encode the state.
///
/// MTBS identifiers start with the two-letter postal code, e.g.
/// `CA3985012280020170812`.
pub const REGION_PREFIX_WIDTH: usize = 2;

/// Count missing values per column, in column order.
pub fn count_missing(dataset: &Dataset) -> Vec<(String, usize)> {
    let mut counts = vec![0usize; dataset.columns().len()];
    for row in dataset.rows() {
        for (count, value) in counts.iter_mut().zip(row) {
            if value.is_null() {
                *count += 1;
            }
        }
    }
    dataset.columns().iter().cloned().zip(counts).collect()
}

/// Keep only the rows whose `column` value is one of `allowed`.
///
/// Non-string cells never match. The number of dropped rows is logged.
pub fn filter_rows(dataset: &Dataset, column: &str, allowed: &[&str]) -> Result<Dataset> {
    let index = dataset.column_index(column)?;
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();

    let filtered = dataset.select_rows(|row| {
        row[index]
            .as_str()
            .is_some_and(|value| allowed_set.contains(value))
    });

    let dropped = dataset.len() - filtered.len();
    info!(
        "Filtering {} for values in {:?} has dropped {} rows from the dataset",
        column, allowed, dropped
    );

    Ok(filtered)
}

/// Add a `state` column from the first two characters of `Event_ID`.
///
/// Identifiers shorter than the prefix are copied whole; non-string
/// identifiers give a null state.
pub fn derive_region_code(dataset: &Dataset) -> Result<Dataset> {
    let states = dataset
        .column(EVENT_ID_COLUMN)?
        .map(|value| match value.as_str() {
            Some(id) => Value::String(id.chars().take(REGION_PREFIX_WIDTH).collect()),
            None => Value::Null,
        })
        .collect();
    dataset.with_column(STATE_COLUMN, states)
}

/// Add an `area` column with the planar area of each geometry.
///
/// Areas are in the squared units of the source coordinates; nothing is
/// reprojected, so degrees in gives square degrees out.
pub fn derive_area(dataset: &Dataset) -> Result<Dataset> {
    let areas = dataset
        .column(GEOMETRY_COLUMN)?
        .map(|value| match value.as_geometry() {
            Some(geometry) => Value::Float(geometry.unsigned_area()),
            None => Value::Null,
        })
        .collect();
    dataset.with_column(AREA_COLUMN, areas)
}

/// Min-max scale `values` into `[0, 1]`.
///
/// If every value is equal the result is all zeros. An empty input gives an
/// empty output.
pub fn normalise(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![0.0; values.len()];
    }

    let range = max - min;
    values.iter().map(|v| (v - min) / range).collect()
}

/// Return a copy with each named column min-max scaled independently.
///
/// Nulls stay null and are ignored when computing the range.
pub fn normalise_columns(dataset: &Dataset, columns: &[&str]) -> Result<Dataset> {
    let mut out = dataset.clone();

    for &column in columns {
        let mut positions = Vec::new();
        let mut numbers = Vec::new();
        for (row, value) in dataset.column(column)?.enumerate() {
            if value.is_null() {
                continue;
            }
            let number = value.as_f64().ok_or_else(|| FrameError::NonNumeric {
                column: column.to_string(),
                row,
                value: value.to_string(),
            })?;
            positions.push(row);
            numbers.push(number);
        }

        let mut scaled = vec![Value::Null; dataset.len()];
        for (row, number) in positions.into_iter().zip(normalise(&numbers)) {
            scaled[row] = Value::Float(number);
        }
        out = out.with_column(column, scaled)?;
    }

    Ok(out)
}
