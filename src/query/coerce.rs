//! # Value Coercion
//!
//! Converts wire-format string tokens into typed values.
//! Coercion is total: malformed input is reported, never panics.
//! Empty tokens are rejected by the caller before coercion runs.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// A typed filter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    Text(String),
    Integer(i64),
}

impl TypedValue {
    /// Orders two values of the same type; `None` across types
    pub fn compare(&self, other: &TypedValue) -> Option<Ordering> {
        match (self, other) {
            (TypedValue::Integer(a), TypedValue::Integer(b)) => Some(a.cmp(b)),
            (TypedValue::Text(a), TypedValue::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// JSON representation used in filter documents
    pub fn to_json(&self) -> Value {
        match self {
            TypedValue::Text(s) => Value::String(s.clone()),
            TypedValue::Integer(n) => Value::Number((*n).into()),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Text(s) => f.write_str(s),
            TypedValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::Text(s.to_string())
    }
}

impl From<i64> for TypedValue {
    fn from(n: i64) -> Self {
        TypedValue::Integer(n)
    }
}

/// Token could not be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionError {
    pub expected: Coercion,
    pub raw: String,
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, got '{}'", self.expected.type_name(), self.raw)
    }
}

impl std::error::Error for CoercionError {}

/// Named conversion strategy held by each registry field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Token is used verbatim
    Text,
    /// Base-10 signed 64-bit integer, no surrounding whitespace
    Integer,
}

impl Coercion {
    /// Convert a raw token
    pub fn apply(&self, raw: &str) -> Result<TypedValue, CoercionError> {
        match self {
            Coercion::Text => Ok(TypedValue::Text(raw.to_string())),
            Coercion::Integer => raw
                .parse::<i64>()
                .map(TypedValue::Integer)
                .map_err(|_| CoercionError {
                    expected: *self,
                    raw: raw.to_string(),
                }),
        }
    }

    /// Whether produced values support range comparison
    pub fn is_orderable(&self) -> bool {
        matches!(self, Coercion::Integer)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Coercion::Text => "text",
            Coercion::Integer => "integer",
        }
    }
}
