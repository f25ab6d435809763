//! In-memory document store
//!
//! Collections are insertion-ordered document lists behind one `RwLock`.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use tracing::debug;

use crate::query::FilterDocument;

use super::errors::{StoreError, StoreResult};
use super::matcher::{compare_for_sort, FilterMatcher};
use super::store::{Direction, DocumentStore, SortSpec, ID_KEY};

/// Process-local document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub fn count(&self, collection: &str) -> StoreResult<usize> {
        let data = self.collections.read().map_err(|_| lock_poisoned())?;
        Ok(data.get(collection).map(Vec::len).unwrap_or(0))
    }
}

fn lock_poisoned() -> StoreError {
    StoreError::Internal("Lock poisoned".to_string())
}

fn key_matches(document: &Value, key: &str, value: &Value) -> bool {
    FilterMatcher::matches(document, &FilterDocument::key_equals(key, value.clone()).into_value())
}

impl DocumentStore for MemoryStore {
    fn find_many(
        &self,
        collection: &str,
        filter: &FilterDocument,
        sort: &SortSpec,
    ) -> StoreResult<Vec<Value>> {
        let data = self.collections.read().map_err(|_| lock_poisoned())?;

        let mut found: Vec<Value> = data
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| FilterMatcher::matches(doc, filter.as_value()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        // stable sort keeps insertion order between equal keys
        found.sort_by(|a, b| {
            let cmp = compare_for_sort(a.get(&sort.field), b.get(&sort.field));
            match sort.direction {
                Direction::Ascending => cmp,
                Direction::Descending => cmp.reverse(),
            }
        });

        debug!(collection, %filter, matched = found.len(), "find_many");
        Ok(found)
    }

    fn find_one(&self, collection: &str, key: &str, value: &Value) -> StoreResult<Option<Value>> {
        let data = self.collections.read().map_err(|_| lock_poisoned())?;

        Ok(data
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| key_matches(doc, key, value)))
            .cloned())
    }

    fn insert(&self, collection: &str, document: Value) -> StoreResult<()> {
        let id = document
            .get(ID_KEY)
            .cloned()
            .ok_or_else(|| StoreError::Internal(format!("document has no {}", ID_KEY)))?;

        let mut data = self.collections.write().map_err(|_| lock_poisoned())?;
        let docs = data.entry(collection.to_string()).or_default();

        if docs.iter().any(|doc| key_matches(doc, ID_KEY, &id)) {
            return Err(StoreError::AlreadyExists {
                collection: collection.to_string(),
                id: id.as_str().map(str::to_string).unwrap_or_else(|| id.to_string()),
            });
        }

        docs.push(document);
        Ok(())
    }

    fn delete(&self, collection: &str, key: &str, value: &Value) -> StoreResult<()> {
        let mut data = self.collections.write().map_err(|_| lock_poisoned())?;

        let nothing = || StoreError::NothingToDelete {
            collection: collection.to_string(),
        };
        let docs = data.get_mut(collection).ok_or_else(nothing)?;
        let idx = docs
            .iter()
            .position(|doc| key_matches(doc, key, value))
            .ok_or_else(nothing)?;

        docs.remove(idx);
        Ok(())
    }
}
