//! # Filter Expression AST
//!
//! Compiled, typed filter terms keyed by storage field.

use serde::Serialize;

use super::coerce::TypedValue;

/// One atomic condition on a single storage field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FilterTerm {
    /// Field equals the value
    Equals { key: String, value: TypedValue },

    /// Field equals any of the values
    OneOf { key: String, values: Vec<TypedValue> },

    /// Field lies within the inclusive bounds; at least one bound is set
    Range {
        key: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<TypedValue>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<TypedValue>,
    },
}

impl FilterTerm {
    pub fn equals(key: impl Into<String>, value: impl Into<TypedValue>) -> Self {
        FilterTerm::Equals {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn one_of(key: impl Into<String>, values: Vec<TypedValue>) -> Self {
        FilterTerm::OneOf {
            key: key.into(),
            values,
        }
    }

    pub fn range(key: impl Into<String>, min: Option<TypedValue>, max: Option<TypedValue>) -> Self {
        FilterTerm::Range {
            key: key.into(),
            min,
            max,
        }
    }

    /// Storage key this term constrains
    pub fn key(&self) -> &str {
        match self {
            FilterTerm::Equals { key, .. } => key,
            FilterTerm::OneOf { key, .. } => key,
            FilterTerm::Range { key, .. } => key,
        }
    }
}

/// Terms combined with AND logic, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompositeFilter {
    terms: Vec<FilterTerm>,
}

impl CompositeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, term: FilterTerm) -> Self {
        self.terms.push(term);
        self
    }

    pub fn push(&mut self, term: FilterTerm) {
        self.terms.push(term);
    }

    pub fn terms(&self) -> &[FilterTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
