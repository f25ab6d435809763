//! # Filter Term Parser
//!
//! Classifies a raw parameter value by the reserved delimiter tokens it
//! contains and splits it into the raw tokens the compiler coerces.
//!
//! | value           | kind       |
//! |-----------------|------------|
//! | `Ann%,Bob%,Cid` | membership |
//! | `18%-65`        | range      |
//! | `%-65`          | range, max only |
//! | `18%-`          | range, min only |
//! | anything else   | equality   |

use super::errors::FilterErrorKind;
use super::registry::{FieldSpec, FilterKind};

/// Separates OR-ed values of a membership filter
pub const LIST_DELIMITER: &str = "%,";

/// Separates the bounds of a range filter
pub const RANGE_DELIMITER: &str = "%-";

/// A classified but not yet coerced filter request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTerm<'a> {
    Equality(&'a str),
    Membership(Vec<&'a str>),
    Range {
        min: Option<&'a str>,
        max: Option<&'a str>,
    },
}

impl RawTerm<'_> {
    pub fn kind(&self) -> FilterKind {
        match self {
            RawTerm::Equality(_) => FilterKind::Equality,
            RawTerm::Membership(_) => FilterKind::Membership,
            RawTerm::Range { .. } => FilterKind::Range,
        }
    }
}

/// Classify `value` for the given field.
///
/// The list delimiter wins over the range delimiter. Capability is
/// checked before the shape of the value.
pub fn classify<'a>(value: &'a str, spec: &FieldSpec) -> Result<RawTerm<'a>, FilterErrorKind> {
    if value.contains(LIST_DELIMITER) {
        if !spec.allows(FilterKind::Membership) {
            return Err(FilterErrorKind::NotMembershipCapable);
        }
        return Ok(RawTerm::Membership(value.split(LIST_DELIMITER).collect()));
    }

    if value.contains(RANGE_DELIMITER) {
        if !spec.allows(FilterKind::Range) {
            return Err(FilterErrorKind::NotRangeCapable);
        }
        return split_range(value);
    }

    Ok(RawTerm::Equality(value))
}

fn split_range(value: &str) -> Result<RawTerm<'_>, FilterErrorKind> {
    let parts: Vec<&str> = value.split(RANGE_DELIMITER).collect();
    if parts.len() != 2 {
        return Err(FilterErrorKind::MalformedRange);
    }

    // leading delimiter leaves an empty min, trailing one an empty max
    let min = Some(parts[0]).filter(|s| !s.is_empty());
    let max = Some(parts[1]).filter(|s| !s.is_empty());
    if min.is_none() && max.is_none() {
        return Err(FilterErrorKind::MalformedRange);
    }

    Ok(RawTerm::Range { min, max })
}
