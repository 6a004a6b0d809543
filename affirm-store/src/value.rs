//! Scalar values the shared store can hold.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value stored under one key.
///
/// Platform stores only hold primitives; timestamps and lists are carried as
/// [`StoreValue::Text`] (ISO-8601 and JSON respectively).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl StoreValue {
    /// Returns the text payload, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the numeric payload as `f64`. Integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Short type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
        }
    }
}

impl fmt::Display for StoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<String> for StoreValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for StoreValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for StoreValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for StoreValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for StoreValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
