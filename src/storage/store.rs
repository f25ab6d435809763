//! Document store contract
//!
//! The engine behind it is opaque: it receives serialized filter
//! documents and plain JSON documents, nothing else.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::query::FilterDocument;

use super::errors::StoreResult;

/// Primary key of every stored document
pub const ID_KEY: &str = "_id";

/// Collection holding user records
pub const USER_COLLECTION: &str = "users";

/// Collection holding calendar entries
pub const CALENDAR_COLLECTION: &str = "calendar";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Sort clause for `find_many`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: Direction,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

/// Operations the REST layer needs from the document database
pub trait DocumentStore: Send + Sync {
    /// All documents matching `filter`, ordered by `sort`
    fn find_many(
        &self,
        collection: &str,
        filter: &FilterDocument,
        sort: &SortSpec,
    ) -> StoreResult<Vec<Value>>;

    /// First document whose `key` equals `value`
    fn find_one(&self, collection: &str, key: &str, value: &Value) -> StoreResult<Option<Value>>;

    /// Insert a document; `_id` must be unique in the collection
    fn insert(&self, collection: &str, document: Value) -> StoreResult<()>;

    /// Delete the first document whose `key` equals `value`
    fn delete(&self, collection: &str, key: &str, value: &Value) -> StoreResult<()>;
}
