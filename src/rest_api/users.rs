//! User endpoints
//!
//! - `GET /user?email=` fetch one
//! - `POST /user` insert
//! - `DELETE /user?email=` delete one
//! - `GET /user/list?<filters>` filtered list, youngest first

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use validator::Validate;

use crate::schema::{User, UserDocument};
use crate::storage::{SortSpec, StoreError, ID_KEY, USER_COLLECTION};

use super::errors::{RestError, RestResult};
use super::response::ApiResponse;
use super::server::RestState;

/// Users are listed by ascending age
const LIST_SORT_FIELD: &str = "age";

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    #[serde(default)]
    pub email: Option<String>,
}

impl EmailQuery {
    fn require(self) -> RestResult<String> {
        self.email
            .filter(|e| !e.is_empty())
            .ok_or(RestError::MissingParam("email"))
    }
}

/// Decode a stored user document into its wire form
fn decode(doc: Value) -> RestResult<User> {
    let doc: UserDocument = serde_json::from_value(doc)?;
    Ok(doc.into())
}

pub async fn list_users(
    State(state): State<Arc<RestState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> RestResult<Json<ApiResponse<Vec<User>>>> {
    let filter = state.compile_filter(&state.users, &params)?;

    let users = state
        .store
        .find_many(USER_COLLECTION, &filter, &SortSpec::asc(LIST_SORT_FIELD))?
        .into_iter()
        .map(decode)
        .collect::<RestResult<Vec<_>>>()?;

    Ok(Json(ApiResponse::ok(users)))
}

pub async fn get_user(
    State(state): State<Arc<RestState>>,
    Query(query): Query<EmailQuery>,
) -> RestResult<Json<ApiResponse<User>>> {
    let email = query.require()?;

    let doc = state
        .store
        .find_one(USER_COLLECTION, ID_KEY, &Value::String(email))?
        .ok_or_else(|| StoreError::not_found(USER_COLLECTION))?;

    Ok(Json(ApiResponse::ok(decode(doc)?)))
}

pub async fn put_user(
    State(state): State<Arc<RestState>>,
    body: Result<Json<User>, JsonRejection>,
) -> RestResult<(StatusCode, Json<ApiResponse<()>>)> {
    let Json(user) = body.map_err(|e| RestError::InvalidBody(e.body_text()))?;
    user.validate().map_err(RestError::Validation)?;

    let doc = serde_json::to_value(UserDocument::from(user))?;
    state.store.insert(USER_COLLECTION, doc)?;
    info!(collection = USER_COLLECTION, "user created");

    Ok((StatusCode::CREATED, Json(ApiResponse::empty())))
}

pub async fn delete_user(
    State(state): State<Arc<RestState>>,
    Query(query): Query<EmailQuery>,
) -> RestResult<Json<ApiResponse<()>>> {
    let email = query.require()?;

    state
        .store
        .delete(USER_COLLECTION, ID_KEY, &Value::String(email))?;
    info!(collection = USER_COLLECTION, "user deleted");

    Ok(Json(ApiResponse::empty()))
}
