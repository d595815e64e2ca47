//! Result rows as returned by the store

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single column value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RowValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl RowValue {
    /// Interpret the value as a category id
    ///
    /// Text is trimmed and parsed; reals only match when integral.
    pub fn as_category(&self) -> Option<i64> {
        match self {
            RowValue::Null => None,
            RowValue::Integer(n) => Some(*n),
            RowValue::Real(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            RowValue::Real(_) => None,
            RowValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for RowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowValue::Null => write!(f, "NULL"),
            RowValue::Integer(n) => write!(f, "{}", n),
            RowValue::Real(r) => write!(f, "{}", r),
            RowValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RowValue {
    fn from(n: i64) -> Self {
        RowValue::Integer(n)
    }
}

impl From<&str> for RowValue {
    fn from(s: &str) -> Self {
        RowValue::Text(s.to_string())
    }
}

impl From<String> for RowValue {
    fn from(s: String) -> Self {
        RowValue::Text(s)
    }
}

/// One row, columns in store order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRow {
    columns: Vec<(String, RowValue)>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column; builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RowValue>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<RowValue>) {
        self.columns.push((name.into(), value.into()));
    }

    /// First column with the given name
    pub fn get(&self, name: &str) -> Option<&RowValue> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &RowValue)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
