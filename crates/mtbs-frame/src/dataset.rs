//! Row-oriented record table.

use crate::{FrameError, Result, Value};

/// Name of the column holding perimeter geometry.
pub const GEOMETRY_COLUMN: &str = "geometry";

/// An ordered table of records with named columns.
///
/// Each row holds exactly one [`Value`] per column, in column order. Column
/// names are not required to be unique by the format, but lookups return the
/// first match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create an empty dataset with the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. It must have one value per column.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(FrameError::RowLength {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, in order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))
    }

    /// Iterate over the values of one column.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Value> + '_> {
        let index = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[index]))
    }

    /// Value at a given row and column.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column).ok()?;
        self.rows.get(row).map(|r| &r[index])
    }

    /// Return a copy with `name` set to `values`.
    ///
    /// An existing column of that name is replaced in place; otherwise the
    /// column is appended.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Result<Dataset> {
        if values.len() != self.rows.len() {
            return Err(FrameError::RowLength {
                expected: self.rows.len(),
                found: values.len(),
            });
        }

        let mut out = self.clone();
        match out.columns.iter().position(|c| c == name) {
            Some(index) => {
                for (row, value) in out.rows.iter_mut().zip(values) {
                    row[index] = value;
                }
            }
            None => {
                out.columns.push(name.to_string());
                for (row, value) in out.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(out)
    }

    /// Return a copy holding only the rows for which `keep` returns true.
    ///
    /// Relative row order is preserved.
    pub fn select_rows<F>(&self, mut keep: F) -> Dataset
    where
        F: FnMut(&[Value]) -> bool,
    {
        Dataset {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|row| keep(row)).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let mut dataset = Dataset::new(["Event_ID", "BurnBndAc"]);
        dataset
            .push_row(vec!["CA3456".into(), Value::Integer(1200)])
            .unwrap();
        dataset.push_row(vec!["OR4321".into(), Value::Null]).unwrap();
        dataset
    }

    #[test]
    fn test_push_row_length_checked() {
        let mut dataset = sample();
        let err = dataset.push_row(vec![Value::Null]).unwrap_err();
        assert!(matches!(err, FrameError::RowLength { expected: 2, found: 1 }));
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_column_access() {
        let dataset = sample();
        let ids: Vec<_> = dataset
            .column("Event_ID")
            .unwrap()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["CA3456", "OR4321"]);
        assert!(matches!(
            dataset.column("Incid_Type"),
            Err(FrameError::ColumnNotFound(_))
        ));
        assert_eq!(dataset.get(1, "BurnBndAc"), Some(&Value::Null));
        assert_eq!(dataset.get(5, "BurnBndAc"), None);
    }

    #[test]
    fn test_with_column_appends_and_replaces() {
        let dataset = sample();

        let added = dataset
            .with_column("state", vec!["CA".into(), "OR".into()])
            .unwrap();
        assert_eq!(added.columns(), &["Event_ID", "BurnBndAc", "state"]);
        assert_eq!(dataset.columns().len(), 2, "original untouched");

        let replaced = added
            .with_column("BurnBndAc", vec![Value::Float(1.0), Value::Float(0.0)])
            .unwrap();
        assert_eq!(replaced.columns().len(), 3);
        assert_eq!(replaced.get(0, "BurnBndAc"), Some(&Value::Float(1.0)));

        assert!(dataset.with_column("x", vec![]).is_err());
    }

    #[test]
    fn test_select_rows_keeps_order() {
        let mut dataset = Dataset::new(["n"]);
        for n in 0..6 {
            dataset.push_row(vec![Value::Integer(n)]).unwrap();
        }
        let even = dataset.select_rows(|row| row[0].as_i64().unwrap() % 2 == 0);
        let values: Vec<_> = even.column("n").unwrap().filter_map(Value::as_i64).collect();
        assert_eq!(values, vec![0, 2, 4]);
    }
}
