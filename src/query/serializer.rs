//! # Filter Document Serializer
//!
//! Renders a [`CompositeFilter`] as a Mongo-style filter document.
//!
//! - `Equals` → `{key: value}`
//! - `OneOf`  → `{"$or": [{key: v1}, {key: v2}]}`
//! - `Range`  → `{key: {"$gte": min, "$lte": max}}`
//!
//! Both bounds of a range live in one comparison object under one key.
//! Several terms are wrapped in an explicit `$and` so that two clauses
//! never share a top-level key.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::filter::{CompositeFilter, FilterTerm};

pub const OP_AND: &str = "$and";
pub const OP_OR: &str = "$or";
pub const OP_GTE: &str = "$gte";
pub const OP_LTE: &str = "$lte";

/// Backend-native filter, always a JSON object
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterDocument(Value);

impl FilterDocument {
    /// Matches every document
    pub fn match_all() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Single `{key: value}` clause
    pub fn key_equals(key: &str, value: Value) -> Self {
        let mut map = Map::new();
        map.insert(key.to_string(), value);
        Self(Value::Object(map))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl fmt::Display for FilterDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render the composite filter
pub fn serialize(filter: &CompositeFilter) -> FilterDocument {
    let mut clauses: Vec<Value> = filter.terms().iter().map(term_clause).collect();
    match clauses.len() {
        0 => FilterDocument::match_all(),
        1 => FilterDocument(clauses.remove(0)),
        _ => FilterDocument(json!({ OP_AND: clauses })),
    }
}

fn term_clause(term: &FilterTerm) -> Value {
    match term {
        FilterTerm::Equals { key, value } => single(key, value.to_json()),
        FilterTerm::OneOf { key, values } => {
            let alternatives: Vec<Value> = values.iter().map(|v| single(key, v.to_json())).collect();
            json!({ OP_OR: alternatives })
        }
        FilterTerm::Range { key, min, max } => {
            let mut bounds = Map::new();
            if let Some(min) = min {
                bounds.insert(OP_GTE.to_string(), min.to_json());
            }
            if let Some(max) = max {
                bounds.insert(OP_LTE.to_string(), max.to_json());
            }
            single(key, Value::Object(bounds))
        }
    }
}

fn single(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}
