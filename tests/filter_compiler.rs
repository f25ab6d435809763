//! Filter Compiler Tests
//!
//! End-to-end behaviour of parameter compilation through the public API:
//! - Unknown fields are rejected (or skipped in lenient mode)
//! - Empty values produce no term and no error
//! - Range and membership shapes are checked against field capabilities
//! - Every independent error is reported
//! - Serialized filters select the expected documents

use remindal::query::{
    serialize, CompileErrors, FieldRegistry, FilterErrorKind, FilterTerm, QueryCompiler,
    TypedValue, UnknownFieldPolicy,
};
use remindal::storage::{DocumentStore, MemoryStore, SortSpec};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn users() -> FieldRegistry {
    FieldRegistry::users().unwrap()
}

fn calendar() -> FieldRegistry {
    FieldRegistry::calendar().unwrap()
}

fn compile(
    registry: &FieldRegistry,
    params: &[(&str, &str)],
) -> Result<Vec<FilterTerm>, CompileErrors> {
    QueryCompiler::new(registry)
        .compile(params.iter().copied())
        .map(|filter| filter.terms().to_vec())
}

fn only_error(errors: &CompileErrors) -> (FilterErrorKind, &str, &str) {
    assert_eq!(errors.len(), 1, "expected one error, got {}", errors);
    let err = &errors.errors()[0];
    (err.kind, err.field.as_str(), err.value.as_str())
}

fn int(n: i64) -> TypedValue {
    TypedValue::Integer(n)
}

fn text(s: &str) -> TypedValue {
    TypedValue::Text(s.to_string())
}

// =============================================================================
// Term Shapes
// =============================================================================

#[test]
fn test_unknown_field_rejected() {
    let errors = compile(&users(), &[("nickname", "x")]).unwrap_err();
    assert_eq!(only_error(&errors), (FilterErrorKind::UnknownField, "nickname", "x"));
}

#[test]
fn test_unknown_field_ignored_in_lenient_mode() {
    let filter = QueryCompiler::new(&users())
        .with_policy(UnknownFieldPolicy::Ignore)
        .compile([("nickname", "x"), ("age", "30")])
        .unwrap();

    assert_eq!(filter.terms(), &[FilterTerm::equals("age", 30i64)]);
}

#[test]
fn test_empty_value_is_skipped_for_any_field() {
    for key in ["email", "name", "age", "nickname"] {
        let terms = compile(&users(), &[(key, "")]).unwrap();
        assert!(terms.is_empty(), "key {} produced a term", key);
    }
}

#[test]
fn test_full_and_open_ranges() {
    let registry = users();

    assert_eq!(
        compile(&registry, &[("age", "18%-65")]).unwrap(),
        vec![FilterTerm::range("age", Some(int(18)), Some(int(65)))]
    );
    assert_eq!(
        compile(&registry, &[("age", "%-65")]).unwrap(),
        vec![FilterTerm::range("age", None, Some(int(65)))]
    );
    assert_eq!(
        compile(&registry, &[("age", "18%-")]).unwrap(),
        vec![FilterTerm::range("age", Some(int(18)), None)]
    );
}

#[test]
fn test_inverted_range_rejected() {
    let errors = compile(&users(), &[("age", "65%-18")]).unwrap_err();
    assert_eq!(only_error(&errors), (FilterErrorKind::InvalidRangeOrder, "age", "65%-18"));
}

#[test]
fn test_bare_range_delimiter_is_malformed() {
    let errors = compile(&users(), &[("age", "%-")]).unwrap_err();
    assert_eq!(only_error(&errors).0, FilterErrorKind::MalformedRange);
}

#[test]
fn test_three_bound_range_is_malformed() {
    let errors = compile(&calendar(), &[("year", "1%-2%-3")]).unwrap_err();
    assert_eq!(only_error(&errors).0, FilterErrorKind::MalformedRange);
}

#[test]
fn test_membership_on_capable_field() {
    assert_eq!(
        compile(&users(), &[("name", "Ann%,Bob")]).unwrap(),
        vec![FilterTerm::one_of("name", vec![text("Ann"), text("Bob")])]
    );
}

#[test]
fn test_membership_on_incapable_field() {
    let errors = compile(&users(), &[("age", "1%,2")]).unwrap_err();
    assert_eq!(only_error(&errors).0, FilterErrorKind::NotMembershipCapable);

    let errors = compile(&calendar(), &[("id", "a%,b")]).unwrap_err();
    assert_eq!(only_error(&errors).0, FilterErrorKind::NotMembershipCapable);
}

#[test]
fn test_range_on_text_field() {
    let errors = compile(&users(), &[("name", "a%-z")]).unwrap_err();
    assert_eq!(only_error(&errors), (FilterErrorKind::NotRangeCapable, "name", "a%-z"));
}

#[test]
fn test_conversion_error_leaves_no_term() {
    let errors = compile(&users(), &[("age", "notanumber")]).unwrap_err();
    assert_eq!(
        only_error(&errors),
        (FilterErrorKind::ConversionError, "age", "notanumber")
    );

    let errors = compile(&users(), &[("age", "18%-old")]).unwrap_err();
    assert_eq!(only_error(&errors).0, FilterErrorKind::ConversionError);
}

#[test]
fn test_email_maps_to_storage_key() {
    assert_eq!(
        compile(&users(), &[("email", "a@b.c")]).unwrap(),
        vec![FilterTerm::equals("_id", "a@b.c")]
    );
}

// =============================================================================
// Error Accumulation
// =============================================================================

#[test]
fn test_independent_errors_all_reported() {
    let errors = compile(
        &calendar(),
        &[("year", "soon"), ("month", "12%-1"), ("colour", "red"), ("day", "3")],
    )
    .unwrap_err();

    assert_eq!(errors.len(), 3);
    assert_eq!(
        errors.for_field("year").next().map(|e| e.kind),
        Some(FilterErrorKind::ConversionError)
    );
    assert_eq!(
        errors.for_field("month").next().map(|e| e.kind),
        Some(FilterErrorKind::InvalidRangeOrder)
    );
    assert_eq!(
        errors.for_field("colour").next().map(|e| e.kind),
        Some(FilterErrorKind::UnknownField)
    );
}

#[test]
fn test_repeated_field_errors_are_not_overwritten() {
    let errors = compile(&users(), &[("age", "x"), ("age", "y")]).unwrap_err();
    let values: Vec<&str> = errors.for_field("age").map(|e| e.value.as_str()).collect();
    assert_eq!(values, vec!["x", "y"]);
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_range_serializes_to_single_entry() {
    let filter = QueryCompiler::new(&users())
        .compile([("age", "18%-65")])
        .unwrap();

    let doc = serialize(&filter).into_value();
    assert_eq!(doc, json!({"age": {"$gte": 18, "$lte": 65}}));
    assert_eq!(doc.as_object().map(|o| o.len()), Some(1));
}

#[test]
fn test_empty_filter_matches_everything() {
    let filter = QueryCompiler::new(&users()).compile([("age", "")]).unwrap();
    assert_eq!(serialize(&filter).into_value(), json!({}));
}

// =============================================================================
// Store Evaluation
// =============================================================================

fn seeded_calendar() -> MemoryStore {
    let store = MemoryStore::new();
    let entries = [
        json!({"_id": "a", "type": "birthday", "labels": ["family"], "year": 2019, "month": 3, "day": 1}),
        json!({"_id": "b", "type": "meeting", "labels": ["work", "q1"], "year": 2021, "month": 1, "day": 9}),
        json!({"_id": "c", "type": "meeting", "labels": ["work"], "year": 2023, "month": 6, "day": 20}),
        json!({"_id": "d", "type": "holiday", "labels": [], "year": 2024, "month": 8, "day": 15}),
    ];
    for entry in entries {
        store.insert("calendar", entry).unwrap();
    }
    store
}

fn select(store: &MemoryStore, params: &[(&str, &str)]) -> Vec<String> {
    let filter = QueryCompiler::new(&calendar())
        .compile(params.iter().copied())
        .unwrap();
    store
        .find_many("calendar", &serialize(&filter), &SortSpec::desc("year"))
        .unwrap()
        .into_iter()
        .filter_map(|doc| doc.get("_id").and_then(Value::as_str).map(str::to_string))
        .collect()
}

#[test]
fn test_compiled_filters_select_expected_documents() {
    let store = seeded_calendar();

    assert_eq!(select(&store, &[]), vec!["d", "c", "b", "a"]);
    assert_eq!(select(&store, &[("type", "meeting")]), vec!["c", "b"]);
    assert_eq!(select(&store, &[("labels", "work")]), vec!["c", "b"]);
    assert_eq!(select(&store, &[("labels", "family%,q1")]), vec!["b", "a"]);
    assert_eq!(select(&store, &[("year", "2020%-2023")]), vec!["c", "b"]);
    assert_eq!(select(&store, &[("year", "%-2021")]), vec!["b", "a"]);
    assert_eq!(
        select(&store, &[("type", "meeting%,holiday"), ("month", "5%-")]),
        vec!["d", "c"]
    );
}
