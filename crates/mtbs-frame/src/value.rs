//! Cell value type.
//!
//! A [`Value`] is one cell of a [`crate::Dataset`]: an attribute scalar read
//! from the dBASE table, a derived number, or the perimeter geometry.

use geo::MultiPolygon;

// ============================================================================
// Value Enum
// ============================================================================

/// The type of value a cell can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer value (i64).
    Integer(i64),
    /// Floating point value (f64).
    Float(f64),
    /// String value.
    String(String),
    /// Boolean value.
    Bool(bool),
    /// Perimeter geometry in the source coordinate units.
    Geometry(MultiPolygon<f64>),
    /// Missing value.
    Null,
}

impl Value {
    /// Convert to i64 if possible.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            Value::Float(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// Convert to f64 if possible.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the geometry if this is a geometry cell.
    pub fn as_geometry(&self) -> Option<&MultiPolygon<f64>> {
        match self {
            Value::Geometry(v) => Some(v),
            _ => None,
        }
    }

    /// Check if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Geometry(v) => write!(f, "<multipolygon: {} parts>", v.0.len()),
            Value::Null => write!(f, "null"),
        }
    }
}

// ============================================================================
// From implementations for Value
// ============================================================================

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<MultiPolygon<f64>> for Value {
    fn from(v: MultiPolygon<f64>) -> Self {
        Value::Geometry(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}
