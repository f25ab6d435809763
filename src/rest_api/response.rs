//! # Response Formatting
//!
//! Every endpoint answers with the same envelope:
//! `{"ok": bool, "message"?: string, "res"?: any, "errors"?: [...]}`.

use serde::Serialize;

use crate::query::FilterError;

/// Standard response envelope
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub res: Option<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDetail>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying data
    pub fn ok(res: T) -> Self {
        Self {
            ok: true,
            message: None,
            res: Some(res),
            errors: Vec::new(),
        }
    }

    /// Failed response with a description and optional details
    pub fn failure(message: impl Into<String>, errors: Vec<ErrorDetail>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
            res: None,
            errors,
        }
    }
}

impl ApiResponse<()> {
    /// Successful response without data
    pub fn empty() -> Self {
        Self {
            ok: true,
            message: None,
            res: None,
            errors: Vec::new(),
        }
    }
}

/// One rejected field in a failed response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub code: String,
    pub message: String,
}

impl From<&FilterError> for ErrorDetail {
    fn from(err: &FilterError) -> Self {
        Self {
            field: err.field.clone(),
            value: Some(err.value.clone()),
            code: err.kind.code().to_string(),
            message: err.message().to_string(),
        }
    }
}
