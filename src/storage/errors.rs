//! Storage error types
//!
//! Error codes:
//! - REMINDAL_STORE_ALREADY_EXISTS
//! - REMINDAL_STORE_NOT_FOUND
//! - REMINDAL_STORE_NOTHING_TO_DELETE
//! - REMINDAL_STORE_INTERNAL

use thiserror::Error;

/// Document store failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Primary key collision on insert
    #[error("item already in database")]
    AlreadyExists { collection: String, id: String },

    /// Lookup matched nothing
    #[error("no documents found")]
    NotFound { collection: String },

    /// Delete matched nothing
    #[error("no item to delete matched the filters")]
    NothingToDelete { collection: String },

    /// Backend failure
    #[error("internal server error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::AlreadyExists { .. } => "REMINDAL_STORE_ALREADY_EXISTS",
            StoreError::NotFound { .. } => "REMINDAL_STORE_NOT_FOUND",
            StoreError::NothingToDelete { .. } => "REMINDAL_STORE_NOTHING_TO_DELETE",
            StoreError::Internal(_) => "REMINDAL_STORE_INTERNAL",
        }
    }

    pub fn not_found(collection: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
