//! Incoming request fields
//!
//! A request is a flat mapping of field name to value. Form decoders turn
//! `name[key]=v` into a nested value; that shape is kept as
//! `FieldValue::Structured` so the validator can reject it where text is
//! expected.

use crate::errors::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of a single request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Structured(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// The text, if this value is representable as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Structured(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Structured(m) => m.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// Mapping of request field name to value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestFields(BTreeMap<String, FieldValue>);

impl RequestFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text value of `name`, or `None` when absent or structured
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(FieldValue::as_text)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Add one form-style `name=value` pair
    ///
    /// `name[key]=value` nests `key` under `name`. Repeated plain names
    /// overwrite; a plain value cannot be nested into afterwards.
    pub fn insert_pair(&mut self, raw: &str) -> Result<()> {
        let (name, value) = raw.split_once('=').ok_or_else(|| SearchError::Config {
            message: format!("expected KEY=VALUE, got '{}'", raw),
        })?;

        match parse_nested_name(name) {
            Some((outer, inner)) => {
                let slot = self
                    .0
                    .entry(outer.to_string())
                    .or_insert_with(|| FieldValue::Structured(BTreeMap::new()));
                match slot {
                    FieldValue::Structured(map) => {
                        map.insert(inner.to_string(), FieldValue::Text(value.to_string()));
                    }
                    FieldValue::Text(_) => {
                        return Err(SearchError::Config {
                            message: format!("field '{}' is already a plain value", outer),
                        });
                    }
                }
            }
            None => {
                if name.is_empty() {
                    return Err(SearchError::Config {
                        message: format!("empty field name in '{}'", raw),
                    });
                }
                self.insert(name, value);
            }
        }
        Ok(())
    }
}

fn parse_nested_name(name: &str) -> Option<(&str, &str)> {
    let (outer, rest) = name.split_once('[')?;
    let inner = rest.strip_suffix(']')?;
    if outer.is_empty() {
        return None;
    }
    Some((outer, inner))
}

impl<K, V> FromIterator<(K, V)> for RequestFields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
