//! REST API Tests
//!
//! Drives the full router in-process:
//! - Insert, fetch, list and delete round-trip for both collections
//! - Filtered listings honour the compiled filter and sort order
//! - Rejected filters return 400 with every error listed
//! - Missing parameters, bad bodies and duplicates map to their statuses

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use remindal::http_server::{HttpServer, HttpServerConfig};
use remindal::query::UnknownFieldPolicy;
use remindal::rest_api::RestState;
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn app_with(policy: UnknownFieldPolicy) -> Router {
    let state = Arc::new(RestState::in_memory(policy).unwrap());
    HttpServer::with_state(HttpServerConfig::default(), state).router()
}

fn app() -> Router {
    app_with(UnknownFieldPolicy::Reject)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

fn user(email: &str, name: &str, age: u8) -> Value {
    json!({
        "email": email,
        "password": "secret",
        "name": name,
        "surname": "Doe",
        "age": age
    })
}

async fn seed_users(app: &Router) {
    for (email, name, age) in [
        ("ann@example.com", "Ann", 41),
        ("bob@example.com", "Bob", 17),
        ("cat@example.com", "Cat", 29),
    ] {
        let (status, _) = post(app, "/user", user(email, name, age)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

fn emails(body: &Value) -> Vec<&str> {
    body["res"]
        .as_array()
        .map(|items| items.iter().filter_map(|u| u["email"].as_str()).collect())
        .unwrap_or_default()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = get(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_user_round_trip() {
    let app = app();

    let (status, body) = post(&app, "/user", user("ann@example.com", "Ann", 41)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"ok": true}));

    let (status, body) = get(&app, "/user?email=ann@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["res"],
        json!({"email": "ann@example.com", "name": "Ann", "surname": "Doe", "age": 41})
    );
    assert!(body["res"].get("password").is_none());

    let (status, _) = delete(&app, "/user?email=ann@example.com").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/user?email=ann@example.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn test_user_list_sorted_by_age() {
    let app = app();
    seed_users(&app).await;

    let (status, body) = get(&app, "/user/list").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        emails(&body),
        vec!["bob@example.com", "cat@example.com", "ann@example.com"]
    );
}

#[tokio::test]
async fn test_user_list_filters() {
    let app = app();
    seed_users(&app).await;

    let (_, body) = get(&app, "/user/list?age=18%25-65").await;
    assert_eq!(emails(&body), vec!["cat@example.com", "ann@example.com"]);

    let (_, body) = get(&app, "/user/list?name=Ann%25,Bob").await;
    assert_eq!(emails(&body), vec!["bob@example.com", "ann@example.com"]);

    let (_, body) = get(&app, "/user/list?age=%25-30&name=Cat").await;
    assert_eq!(emails(&body), vec!["cat@example.com"]);

    let (_, body) = get(&app, "/user/list?email=bob@example.com").await;
    assert_eq!(emails(&body), vec!["bob@example.com"]);

    let (status, body) = get(&app, "/user/list?name=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(emails(&body).len(), 3);
}

#[tokio::test]
async fn test_user_list_bad_filters_report_every_error() {
    let app = app();
    seed_users(&app).await;

    let (status, body) = get(&app, "/user/list?age=old&nickname=x&name=a%25-z").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);

    let errors = body["errors"].as_array().unwrap();
    let codes: Vec<&str> = errors.iter().filter_map(|e| e["code"].as_str()).collect();
    assert_eq!(
        codes,
        vec![
            "FILTER_CONVERSION_ERROR",
            "FILTER_UNKNOWN_FIELD",
            "FILTER_NOT_RANGE_CAPABLE"
        ]
    );
    assert_eq!(errors[0]["field"], "age");
    assert_eq!(errors[0]["value"], "old");
}

#[tokio::test]
async fn test_user_list_lenient_skips_unknown() {
    let app = app_with(UnknownFieldPolicy::Ignore);
    seed_users(&app).await;

    let (status, body) = get(&app, "/user/list?nickname=x&age=17").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(emails(&body), vec!["bob@example.com"]);
}

#[tokio::test]
async fn test_user_missing_email() {
    let app = app();

    let (status, body) = get(&app, "/user").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "no email provided");

    let (status, _) = delete(&app, "/user?email=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_duplicate_insert_conflicts() {
    let app = app();
    let (status, _) = post(&app, "/user", user("ann@example.com", "Ann", 41)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(&app, "/user", user("ann@example.com", "Ann", 42)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn test_user_validation_failure() {
    let (status, body) = post(
        &app(),
        "/user",
        json!({"email": "not-an-email", "password": "", "name": "Ann", "surname": "Doe"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["email", "password"]);
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/user")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn test_delete_missing_user_not_found() {
    let (status, _) = delete(&app(), "/user?email=ghost@example.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Calendar
// =============================================================================

#[tokio::test]
async fn test_date_round_trip_with_generated_id() {
    let app = app();

    let (status, body) = post(
        &app,
        "/date",
        json!({"type": "birthday", "labels": ["family"], "year": 2024, "month": 5, "day": 17}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["res"]["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let (status, body) = get(&app, &format!("/date?id={}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["res"]["id"], id.as_str());
    assert_eq!(body["res"]["type"], "birthday");
    assert_eq!(body["res"]["labels"], json!(["family"]));

    let (status, _) = delete(&app, &format!("/date?id={}", id)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, &format!("/date?id={}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_date_list_filters_and_sort() {
    let app = app();
    for (id, kind, labels, year) in [
        ("a", "meeting", json!(["work"]), 2019),
        ("b", "birthday", json!(["family"]), 2024),
        ("c", "meeting", json!(["work", "q3"]), 2022),
    ] {
        let (status, _) = post(
            &app,
            "/date",
            json!({"id": id, "type": kind, "labels": labels, "year": year, "month": 1, "day": 1}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let ids = |body: &Value| -> Vec<String> {
        body["res"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|d| d["id"].as_str().map(str::to_string))
            .collect()
    };

    let (_, body) = get(&app, "/date/list").await;
    assert_eq!(ids(&body), vec!["b", "c", "a"]);

    let (_, body) = get(&app, "/date/list?labels=work").await;
    assert_eq!(ids(&body), vec!["c", "a"]);

    let (_, body) = get(&app, "/date/list?year=2020%25-&type=meeting").await;
    assert_eq!(ids(&body), vec!["c"]);

    let (status, body) = get(&app, "/date/list?id=a%25,b").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["code"], "FILTER_NOT_MEMBERSHIP_CAPABLE");
}

#[tokio::test]
async fn test_date_validation_failure() {
    let (status, body) = post(
        &app(),
        "/date",
        json!({"type": "meeting", "year": 2024, "month": 13, "day": 1, "hours": 24}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["hours", "month"]);
}

#[tokio::test]
async fn test_date_missing_id() {
    let (status, body) = get(&app(), "/date").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "no id provided");
}
