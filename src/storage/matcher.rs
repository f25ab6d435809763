//! Filter document evaluation
//!
//! Evaluates Mongo-style filter documents against JSON documents.
//! Supported: implicit AND over keys, `$and`, `$or`, and the field
//! operators `$eq`, `$ne`, `$gt`, `$gte`, `$lt`, `$lte`.
//! An equality on an array field matches when any element is equal.

use std::cmp::Ordering;

use serde_json::{Map, Value};

/// Evaluates filter documents
pub struct FilterMatcher;

impl FilterMatcher {
    /// Checks if `document` satisfies `filter`
    pub fn matches(document: &Value, filter: &Value) -> bool {
        match filter {
            Value::Object(clauses) => clauses
                .iter()
                .all(|(key, cond)| Self::matches_clause(document, key, cond)),
            _ => false,
        }
    }

    fn matches_clause(document: &Value, key: &str, cond: &Value) -> bool {
        match key {
            "$and" => match cond.as_array() {
                Some(parts) => parts.iter().all(|p| Self::matches(document, p)),
                None => false,
            },
            "$or" => match cond.as_array() {
                Some(parts) => parts.iter().any(|p| Self::matches(document, p)),
                None => false,
            },
            // unknown top-level operator never matches
            k if k.starts_with('$') => false,
            field => {
                let actual = document.get(field);
                match operator_object(cond) {
                    Some(ops) => ops
                        .iter()
                        .all(|(op, bound)| Self::apply_operator(actual, op, bound)),
                    None => Self::eq_match(actual, cond),
                }
            }
        }
    }

    fn apply_operator(actual: Option<&Value>, op: &str, bound: &Value) -> bool {
        match op {
            "$eq" => Self::eq_match(actual, bound),
            "$ne" => !Self::eq_match(actual, bound),
            "$gt" => Self::cmp_match(actual, bound, |o| o == Ordering::Greater),
            "$gte" => Self::cmp_match(actual, bound, |o| o != Ordering::Less),
            "$lt" => Self::cmp_match(actual, bound, |o| o == Ordering::Less),
            "$lte" => Self::cmp_match(actual, bound, |o| o != Ordering::Greater),
            _ => false,
        }
    }

    /// Equality; a missing field equals only `null`
    fn eq_match(actual: Option<&Value>, expected: &Value) -> bool {
        match actual {
            None => expected.is_null(),
            Some(Value::Array(items)) if !expected.is_array() => {
                items.iter().any(|item| values_equal(item, expected))
            }
            Some(value) => values_equal(value, expected),
        }
    }

    /// Ordered comparison; missing fields and mismatched types never match
    fn cmp_match(actual: Option<&Value>, bound: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
        match actual {
            None => false,
            Some(Value::Array(items)) => items
                .iter()
                .any(|item| compare_values(item, bound).is_some_and(&accept)),
            Some(value) => compare_values(value, bound).is_some_and(accept),
        }
    }
}

/// `{"$gte": 1, "$lte": 2}` style condition, as opposed to a literal object
fn operator_object(cond: &Value) -> Option<&Map<String, Value>> {
    match cond {
        Value::Object(map) if !map.is_empty() && map.keys().all(|k| k.starts_with('$')) => {
            Some(map)
        }
        _ => None,
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => compare_values(a, b) == Some(Ordering::Equal),
        _ => a == b,
    }
}

/// Orders numbers and strings; `None` across types
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
                return Some(ai.cmp(&bi));
            }
            a.as_f64()?.partial_cmp(&b.as_f64()?)
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Total order used for sorting: missing fields first
pub fn compare_for_sort(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_values(a, b).unwrap_or(Ordering::Equal),
    }
}
