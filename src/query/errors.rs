//! # Filter Compilation Errors
//!
//! Every failure is scoped to one query parameter and carries the
//! offending field name and raw value. The compiler never recovers from
//! them; callers receive the full set and decide how to answer.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Classification of a per-field filter failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterErrorKind {
    /// Field is not declared in the registry (strict mode only)
    UnknownField,
    /// Value uses the list delimiter on a field without membership support
    NotMembershipCapable,
    /// Value uses the range delimiter on a field without range support
    NotRangeCapable,
    /// Range value split into the wrong number of bounds
    MalformedRange,
    /// Membership list contains an empty element
    EmptyListItem,
    /// Token could not be converted to the field's value type
    ConversionError,
    /// Range lower bound is greater than its upper bound
    InvalidRangeOrder,
}

impl FilterErrorKind {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownField => "FILTER_UNKNOWN_FIELD",
            Self::NotMembershipCapable => "FILTER_NOT_MEMBERSHIP_CAPABLE",
            Self::NotRangeCapable => "FILTER_NOT_RANGE_CAPABLE",
            Self::MalformedRange => "FILTER_MALFORMED_RANGE",
            Self::EmptyListItem => "FILTER_EMPTY_LIST_ITEM",
            Self::ConversionError => "FILTER_CONVERSION_ERROR",
            Self::InvalidRangeOrder => "FILTER_INVALID_RANGE_ORDER",
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::UnknownField => "unknown filter field",
            Self::NotMembershipCapable => "this field cannot be used as a multiple selection filter",
            Self::NotRangeCapable => "this field cannot be used as a range",
            Self::MalformedRange => "too many parameters in range",
            Self::EmptyListItem => "empty value in multiple selection",
            Self::ConversionError => "value has the wrong type for this field",
            Self::InvalidRangeOrder => "range minimum is greater than its maximum",
        }
    }
}

impl fmt::Display for FilterErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single per-field filter failure
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}: {} (field '{field}', value '{value}')", .kind.code(), .kind.describe())]
pub struct FilterError {
    pub field: String,
    pub value: String,
    pub kind: FilterErrorKind,
}

impl FilterError {
    pub fn new(kind: FilterErrorKind, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            kind,
        }
    }

    /// Human-readable description without the field context
    pub fn message(&self) -> &'static str {
        self.kind.describe()
    }
}

/// Non-empty set of errors collected during one compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileErrors(Vec<FilterError>);

impl CompileErrors {
    /// Wrap collected errors; `None` when there are none
    pub fn from_vec(errors: Vec<FilterError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn errors(&self) -> &[FilterError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Errors reported for the given external field
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FilterError> + 'a {
        self.0.iter().filter(move |e| e.field == field)
    }

    pub fn into_vec(self) -> Vec<FilterError> {
        self.0
    }
}

impl fmt::Display for CompileErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid filter(s): ", self.0.len())?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileErrors {}

/// Registry table rejected at startup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("field '{0}' allows range filters but its coercion is not orderable")]
    RangeNotOrderable(String),

    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
