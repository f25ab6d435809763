//! # REST API Errors
//!
//! Error types for the REST API module and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::query::CompileErrors;
use crate::storage::StoreError;

use super::response::{ApiResponse, ErrorDetail};

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// One or more query filters were rejected
    #[error("{0}")]
    InvalidFilter(CompileErrors),

    /// Missing required parameter
    #[error("no {0} provided")]
    MissingParam(&'static str),

    /// Request body is not the expected JSON
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Record failed field validation
    #[error("invalid or missing fields")]
    Validation(ValidationErrors),

    // ==================
    // Storage
    // ==================
    #[error(transparent)]
    Store(#[from] StoreError),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Stored document could not be decoded
    #[error("internal server error: {0}")]
    Internal(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            RestError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            RestError::MissingParam(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RestError::Validation(_) => StatusCode::BAD_REQUEST,

            RestError::Store(store) => match store {
                StoreError::AlreadyExists { .. } => StatusCode::CONFLICT,
                StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                StoreError::NothingToDelete { .. } => StatusCode::NOT_FOUND,
                StoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },

            // 500 Internal Server Error
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Per-field details listed in the response body
    pub fn details(&self) -> Vec<ErrorDetail> {
        match self {
            RestError::InvalidFilter(errors) => {
                errors.errors().iter().map(ErrorDetail::from).collect()
            }
            RestError::Validation(errors) => {
                let mut details: Vec<ErrorDetail> = errors
                    .field_errors()
                    .into_iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| ErrorDetail {
                            field: field.to_string(),
                            value: None,
                            code: "VALIDATION_FAILED".to_string(),
                            message: e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string()),
                        })
                    })
                    .collect();
                // field_errors() is a HashMap
                details.sort_by(|a, b| a.field.cmp(&b.field));
                details
            }
            _ => Vec::new(),
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::Internal(err.to_string())
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = ApiResponse::<()>::failure(self.to_string(), self.details());
        (status, Json(body)).into_response()
    }
}
