//! ESRI shapefile reader.
//!
//! Reads polygon geometry from the `.shp` file and attributes from the
//! sibling `.dbf` table into a [`Dataset`] whose last column is
//! [`GEOMETRY_COLUMN`].

use crate::{Dataset, FrameError, Result, Value, GEOMETRY_COLUMN};
use chrono::NaiveDate;
use geo::{LineString, MultiPolygon, Polygon};
use shapefile::dbase::{self, FieldValue};
use shapefile::{PolygonRing, Shape};
use std::path::Path;
use tracing::{debug, info};

/// dBASE pseudo-field some readers expose for the record deletion marker.
const DELETION_FLAG: &str = "DeletionFlag";

/// Load a shapefile and its attribute table.
pub fn read_shapefile<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();

    let fields = dbase::Reader::from_path(path.with_extension("dbf"))?
        .fields()
        .iter()
        .map(|field| field.name().to_string())
        .filter(|name| name != DELETION_FLAG)
        .collect::<Vec<_>>();

    let records = shapefile::read(path)?;

    let mut dataset = Dataset::new(fields.iter().cloned().chain([GEOMETRY_COLUMN.to_string()]));
    for (shape, record) in records {
        let mut row = Vec::with_capacity(fields.len() + 1);
        for name in &fields {
            row.push(record.get(name).map(value_from_field).unwrap_or(Value::Null));
        }
        row.push(Value::Geometry(geometry_from_shape(shape)?));
        dataset.push_row(row)?;
    }

    info!(
        "Read {} records with {} attribute columns from {}",
        dataset.len(),
        fields.len(),
        path.display()
    );
    debug!("Columns: {:?}", dataset.columns());

    Ok(dataset)
}

/// Convert a dBASE field into a cell value.
///
/// Blank character fields are treated as missing.
fn value_from_field(field: &FieldValue) -> Value {
    match field {
        FieldValue::Character(Some(s)) if !s.trim().is_empty() => Value::String(s.trim().to_string()),
        FieldValue::Character(_) => Value::Null,
        FieldValue::Memo(s) if !s.trim().is_empty() => Value::String(s.trim().to_string()),
        FieldValue::Memo(_) => Value::Null,
        FieldValue::Numeric(v) => Value::from(*v),
        FieldValue::Float(v) => Value::from(v.map(f64::from)),
        FieldValue::Double(v) => Value::Float(*v),
        FieldValue::Currency(v) => Value::Float(*v),
        FieldValue::Integer(v) => Value::Integer(i64::from(*v)),
        FieldValue::Logical(v) => Value::from(*v),
        FieldValue::Date(Some(date)) => {
            NaiveDate::from_ymd_opt(date.year() as i32, date.month(), date.day())
                .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
                .unwrap_or(Value::Null)
        }
        FieldValue::Date(None) => Value::Null,
        other => Value::String(format!("{:?}", other)),
    }
}

/// Convert a shape into a multi-polygon.
///
/// Each outer ring starts a new polygon and inner rings are holes of the
/// outer ring before them. Null shapes become an empty geometry.
fn geometry_from_shape(shape: Shape) -> Result<MultiPolygon<f64>> {
    match shape {
        Shape::Polygon(polygon) => {
            let mut polygons: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();
            for ring in polygon.rings() {
                let line: LineString<f64> = ring.points().iter().map(|p| (p.x, p.y)).collect();
                match ring {
                    PolygonRing::Outer(_) => polygons.push((line, Vec::new())),
                    PolygonRing::Inner(_) => match polygons.last_mut() {
                        Some((_, holes)) => holes.push(line),
                        // A hole with no shell is kept as its own ring.
                        None => polygons.push((line, Vec::new())),
                    },
                }
            }
            Ok(MultiPolygon::new(
                polygons
                    .into_iter()
                    .map(|(exterior, interiors)| Polygon::new(exterior, interiors))
                    .collect(),
            ))
        }
        Shape::NullShape => Ok(MultiPolygon::new(Vec::new())),
        other => Err(FrameError::UnsupportedShape(format!("{:?}", other.shapetype()))),
    }
}
