//! Calendar endpoints
//!
//! - `GET /date?id=` fetch one
//! - `POST /date` insert, generating an id when absent
//! - `DELETE /date?id=` delete one
//! - `GET /date/list?<filters>` filtered list, most recent year first

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use validator::Validate;

use crate::schema::{CalendarDate, CalendarDocument};
use crate::storage::{SortSpec, StoreError, CALENDAR_COLLECTION, ID_KEY};

use super::errors::{RestError, RestResult};
use super::response::ApiResponse;
use super::server::RestState;

const LIST_SORT_FIELD: &str = "year";

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    #[serde(default)]
    pub id: Option<String>,
}

impl IdQuery {
    fn require(self) -> RestResult<String> {
        self.id
            .filter(|id| !id.is_empty())
            .ok_or(RestError::MissingParam("id"))
    }
}

/// Body of a successful insert
#[derive(Debug, Serialize)]
pub struct CreatedDate {
    pub id: String,
}

fn decode(doc: Value) -> RestResult<CalendarDate> {
    let doc: CalendarDocument = serde_json::from_value(doc)?;
    Ok(doc.into())
}

pub async fn list_dates(
    State(state): State<Arc<RestState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> RestResult<Json<ApiResponse<Vec<CalendarDate>>>> {
    let filter = state.compile_filter(&state.calendar, &params)?;

    let dates = state
        .store
        .find_many(CALENDAR_COLLECTION, &filter, &SortSpec::desc(LIST_SORT_FIELD))?
        .into_iter()
        .map(decode)
        .collect::<RestResult<Vec<_>>>()?;

    Ok(Json(ApiResponse::ok(dates)))
}

pub async fn get_date(
    State(state): State<Arc<RestState>>,
    Query(query): Query<IdQuery>,
) -> RestResult<Json<ApiResponse<CalendarDate>>> {
    let id = query.require()?;

    let doc = state
        .store
        .find_one(CALENDAR_COLLECTION, ID_KEY, &Value::String(id))?
        .ok_or_else(|| StoreError::not_found(CALENDAR_COLLECTION))?;

    Ok(Json(ApiResponse::ok(decode(doc)?)))
}

pub async fn put_date(
    State(state): State<Arc<RestState>>,
    body: Result<Json<CalendarDate>, JsonRejection>,
) -> RestResult<(StatusCode, Json<ApiResponse<CreatedDate>>)> {
    let Json(date) = body.map_err(|e| RestError::InvalidBody(e.body_text()))?;
    date.validate().map_err(RestError::Validation)?;

    let doc = date.into_document();
    let id = doc.id.clone();
    state
        .store
        .insert(CALENDAR_COLLECTION, serde_json::to_value(doc)?)?;
    info!(collection = CALENDAR_COLLECTION, %id, "calendar entry created");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(CreatedDate { id }))))
}

pub async fn delete_date(
    State(state): State<Arc<RestState>>,
    Query(query): Query<IdQuery>,
) -> RestResult<Json<ApiResponse<()>>> {
    let id = query.require()?;

    state
        .store
        .delete(CALENDAR_COLLECTION, ID_KEY, &Value::String(id))?;
    info!(collection = CALENDAR_COLLECTION, "calendar entry deleted");

    Ok(Json(ApiResponse::empty()))
}
