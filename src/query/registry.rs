//! # Field Registry
//!
//! Declares, per collection, which logical fields may be filtered, how
//! they map onto storage keys, which filter kinds they accept and how
//! their values are typed.
//!
//! Tables are static. A registry is validated once at startup and then
//! shared read-only between requests.

use std::collections::HashSet;
use std::fmt;

use super::coerce::Coercion;
use super::errors::{RegistryError, RegistryResult};

/// Shape of filter a parameter value requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Equality,
    Membership,
    Range,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterKind::Equality => "equality",
            FilterKind::Membership => "membership",
            FilterKind::Range => "range",
        };
        f.write_str(s)
    }
}

/// Static declaration of one filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Query parameter name
    pub external_key: &'static str,
    /// Document key in the store
    pub storage_key: &'static str,
    /// Kinds beyond equality this field accepts
    pub allowed: &'static [FilterKind],
    pub coercion: Coercion,
}

impl FieldSpec {
    /// Equality is implicitly allowed on every field
    pub fn allows(&self, kind: FilterKind) -> bool {
        kind == FilterKind::Equality || self.allowed.contains(&kind)
    }
}

const TEXT_LIST: &[FilterKind] = &[FilterKind::Equality, FilterKind::Membership];
const INT_RANGE: &[FilterKind] = &[FilterKind::Equality, FilterKind::Range];
const EQ_ONLY: &[FilterKind] = &[FilterKind::Equality];

/// Filterable fields of the `users` collection
pub const USER_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        external_key: "email",
        storage_key: "_id",
        allowed: TEXT_LIST,
        coercion: Coercion::Text,
    },
    FieldSpec {
        external_key: "name",
        storage_key: "name",
        allowed: TEXT_LIST,
        coercion: Coercion::Text,
    },
    FieldSpec {
        external_key: "surname",
        storage_key: "surname",
        allowed: TEXT_LIST,
        coercion: Coercion::Text,
    },
    FieldSpec {
        external_key: "age",
        storage_key: "age",
        allowed: INT_RANGE,
        coercion: Coercion::Integer,
    },
];

/// Filterable fields of the `calendar` collection
pub const CALENDAR_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        external_key: "id",
        storage_key: "_id",
        allowed: EQ_ONLY,
        coercion: Coercion::Text,
    },
    FieldSpec {
        external_key: "type",
        storage_key: "type",
        allowed: TEXT_LIST,
        coercion: Coercion::Text,
    },
    FieldSpec {
        external_key: "labels",
        storage_key: "labels",
        allowed: TEXT_LIST,
        coercion: Coercion::Text,
    },
    FieldSpec {
        external_key: "year",
        storage_key: "year",
        allowed: INT_RANGE,
        coercion: Coercion::Integer,
    },
    FieldSpec {
        external_key: "month",
        storage_key: "month",
        allowed: INT_RANGE,
        coercion: Coercion::Integer,
    },
    FieldSpec {
        external_key: "day",
        storage_key: "day",
        allowed: INT_RANGE,
        coercion: Coercion::Integer,
    },
    FieldSpec {
        external_key: "hours",
        storage_key: "hours",
        allowed: INT_RANGE,
        coercion: Coercion::Integer,
    },
    FieldSpec {
        external_key: "minutes",
        storage_key: "minutes",
        allowed: INT_RANGE,
        coercion: Coercion::Integer,
    },
];

/// Validated, read-only lookup table for one collection
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    collection: &'static str,
    fields: &'static [FieldSpec],
}

impl FieldRegistry {
    /// Validate a field table.
    ///
    /// Rejects duplicate external keys and range-capable fields whose
    /// coercion does not produce an orderable type.
    pub fn new(collection: &'static str, fields: &'static [FieldSpec]) -> RegistryResult<Self> {
        let mut seen = HashSet::new();
        for spec in fields {
            if !seen.insert(spec.external_key) {
                return Err(RegistryError::DuplicateField(spec.external_key.to_string()));
            }
            if spec.allows(FilterKind::Range) && !spec.coercion.is_orderable() {
                return Err(RegistryError::RangeNotOrderable(spec.external_key.to_string()));
            }
        }
        Ok(Self { collection, fields })
    }

    /// Registry for the `users` collection
    pub fn users() -> RegistryResult<Self> {
        Self::new("users", USER_FIELDS)
    }

    /// Registry for the `calendar` collection
    pub fn calendar() -> RegistryResult<Self> {
        Self::new("calendar", CALENDAR_FIELDS)
    }

    pub fn lookup(&self, external_key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.external_key == external_key)
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }
}
