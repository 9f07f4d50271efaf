//! `mtbs clean`: load the perimeters and apply the cleaning steps.

use crate::RunnerError;
use chrono::{DateTime, Utc};
use mtbs_acquire::{verify, Catalogue, INPUTS_CATEGORY};
use mtbs_frame::transform::{self, AREA_COLUMN, STATE_COLUMN};
use mtbs_frame::{read_shapefile, Dataset};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for a cleaning run.
#[derive(Debug, Clone)]
pub struct CleanConfig {
    /// Catalogue category holding the input.
    pub category: String,
    /// Dataset name within the category.
    pub dataset: String,
    /// Column used to select incident types.
    pub filter_column: String,
    /// Incident types to keep.
    pub keep: Vec<String>,
    /// Columns to min-max normalise.
    pub normalise: Vec<String>,
    /// Where to write the JSON summary (None to skip).
    pub report_path: Option<PathBuf>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            category: INPUTS_CATEGORY.to_string(),
            dataset: "wildfires".to_string(),
            filter_column: "Incid_Type".to_string(),
            keep: vec!["Wildfire".to_string(), "Out of area response".to_string()],
            normalise: vec!["BurnBndAc".to_string()],
            report_path: None,
        }
    }
}

// ============================================================================
// Report
// ============================================================================

/// Missing-value count for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingCount {
    /// Column name.
    pub column: String,
    /// Number of null cells.
    pub missing: usize,
}

/// Summary of a cleaning run.
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    /// When the run finished.
    pub generated_at: DateTime<Utc>,
    /// Shapefile that was read, if the data came from disk.
    pub input: Option<PathBuf>,
    /// Records in the shapefile.
    pub rows_read: usize,
    /// Records left after filtering.
    pub rows_kept: usize,
    /// Records removed by the incident-type filter.
    pub rows_dropped: usize,
    /// Null counts per column of the raw data.
    pub missing: Vec<MissingCount>,
    /// Kept perimeters per two-letter state code.
    pub fires_by_state: BTreeMap<String, usize>,
    /// Sum of the `area` column, in squared source units.
    pub total_area: f64,
}

// ============================================================================
// Cleaning
// ============================================================================

/// Verify, read and clean the configured dataset.
pub fn run_clean(catalogue: &Catalogue, config: &CleanConfig) -> Result<(Dataset, CleanReport), RunnerError> {
    let entry = catalogue.entry(&config.category, &config.dataset)?;
    let path = verify(&entry.location, &entry.file_name)?;

    let perimeters = read_shapefile(&path)?;
    let (cleaned, mut report) = clean_dataset(&perimeters, config)?;
    report.input = Some(path);

    if let Some(report_path) = &config.report_path {
        if let Some(parent) = report_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(report_path)?;
        serde_json::to_writer_pretty(file, &report)?;
        info!("Wrote report to {}", report_path.display());
    }

    Ok((cleaned, report))
}

/// Apply the cleaning pipeline to an already loaded dataset.
///
/// Steps: filter incident types, derive `state`, derive `area`, normalise the
/// configured columns.
pub fn clean_dataset(perimeters: &Dataset, config: &CleanConfig) -> Result<(Dataset, CleanReport), RunnerError> {
    let missing: Vec<MissingCount> = transform::count_missing(perimeters)
        .into_iter()
        .map(|(column, missing)| MissingCount { column, missing })
        .collect();
    for count in missing.iter().filter(|c| c.missing > 0) {
        debug!("{} has {} missing values", count.column, count.missing);
    }

    let keep: Vec<&str> = config.keep.iter().map(String::as_str).collect();
    let wildfires = transform::filter_rows(perimeters, &config.filter_column, &keep)?;
    if wildfires.is_empty() {
        warn!("No rows left after filtering {} for {:?}", config.filter_column, keep);
    }

    let wildfires = transform::derive_region_code(&wildfires)?;
    let wildfires = transform::derive_area(&wildfires)?;

    let normalise: Vec<&str> = config.normalise.iter().map(String::as_str).collect();
    let wildfires = transform::normalise_columns(&wildfires, &normalise)?;

    let mut fires_by_state = BTreeMap::new();
    for state in wildfires.column(STATE_COLUMN)?.filter_map(|v| v.as_str()) {
        *fires_by_state.entry(state.to_string()).or_insert(0) += 1;
    }
    let total_area: f64 = wildfires
        .column(AREA_COLUMN)?
        .filter_map(|v| v.as_f64())
        .sum();

    let report = CleanReport {
        generated_at: Utc::now(),
        input: None,
        rows_read: perimeters.len(),
        rows_kept: wildfires.len(),
        rows_dropped: perimeters.len() - wildfires.len(),
        missing,
        fires_by_state,
        total_area,
    };

    info!(
        "Cleaned {} of {} perimeters across {} states",
        report.rows_kept,
        report.rows_read,
        report.fires_by_state.len()
    );

    Ok((wildfires, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtbs_frame::{FrameError, Value, GEOMETRY_COLUMN};

    fn square(size: f64) -> Value {
        Value::Geometry(geo::MultiPolygon::new(vec![geo::Polygon::new(
            geo::LineString::from(vec![(0.0, 0.0), (size, 0.0), (size, size), (0.0, size)]),
            vec![],
        )]))
    }

    fn perimeters() -> Dataset {
        let mut dataset = Dataset::new(["Event_ID", "Incid_Type", "BurnBndAc", GEOMETRY_COLUMN]);
        let rows = [
            ("CA3985012280020170812", "Wildfire", Value::Integer(1000), square(1.0)),
            ("CA4012312280020180101", "Prescribed Fire", Value::Integer(50), square(0.5)),
            ("OR4235012130019990712", "Out of area response", Value::Integer(3000), square(2.0)),
            ("WA4712312280020200704", "Wildfire", Value::Null, square(3.0)),
        ];
        for (id, kind, acres, geometry) in rows {
            dataset
                .push_row(vec![Value::from(id), Value::from(kind), acres, geometry])
                .unwrap();
        }
        dataset
    }

    #[test]
    fn test_clean_pipeline() {
        let (cleaned, report) = clean_dataset(&perimeters(), &CleanConfig::default()).unwrap();

        assert_eq!(report.rows_read, 4);
        assert_eq!(report.rows_kept, 3);
        assert_eq!(report.rows_dropped, 1);
        assert_eq!(
            report.fires_by_state,
            BTreeMap::from([("CA".to_string(), 1), ("OR".to_string(), 1), ("WA".to_string(), 1)])
        );
        assert!((report.total_area - 14.0).abs() < 1e-9);
        assert_eq!(
            report.missing.iter().find(|m| m.column == "BurnBndAc").map(|m| m.missing),
            Some(1)
        );

        assert_eq!(
            cleaned.columns(),
            &["Event_ID", "Incid_Type", "BurnBndAc", GEOMETRY_COLUMN, "state", "area"]
        );
        let acres: Vec<_> = cleaned.column("BurnBndAc").unwrap().cloned().collect();
        assert_eq!(acres, vec![Value::Float(0.0), Value::Float(1.0), Value::Null]);
    }

    #[test]
    fn test_clean_unknown_normalise_column() {
        let config = CleanConfig {
            normalise: vec!["FireArea".to_string()],
            ..Default::default()
        };
        let err = clean_dataset(&perimeters(), &config).unwrap_err();
        assert!(matches!(err, RunnerError::Frame(FrameError::ColumnNotFound(_))));
    }

    #[test]
    fn test_report_serializes() {
        let (_, report) = clean_dataset(&perimeters(), &CleanConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rows_kept"], 3);
        assert_eq!(json["fires_by_state"]["OR"], 1);
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn test_run_clean_requires_input() {
        let dir = tempfile::tempdir().unwrap();
        let catalogue = Catalogue::from_yaml_str(&format!(
            "inputs:\n  wildfires:\n    zip_folder: {root}/mtbs.zip\n    location: {root}/inputs\n    file_name: mtbs_perims_DD.shp\n",
            root = dir.path().display()
        ))
        .unwrap();

        let err = run_clean(&catalogue, &CleanConfig::default()).unwrap_err();
        assert!(err.to_string().contains("mtbs download"));
    }
}
