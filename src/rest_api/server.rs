//! # REST API Router
//!
//! Shared state and route table for the user and calendar endpoints.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tracing::debug;

use crate::query::{
    serialize, FieldRegistry, FilterDocument, QueryCompiler, RegistryResult, UnknownFieldPolicy,
};
use crate::storage::{DocumentStore, MemoryStore};

use super::dates::{delete_date, get_date, list_dates, put_date};
use super::errors::{RestError, RestResult};
use super::users::{delete_user, get_user, list_users, put_user};

/// State shared by every REST handler
pub struct RestState {
    pub store: Arc<dyn DocumentStore>,
    pub users: FieldRegistry,
    pub calendar: FieldRegistry,
    pub policy: UnknownFieldPolicy,
}

impl RestState {
    /// Build the state, validating both field registries
    pub fn new(store: Arc<dyn DocumentStore>, policy: UnknownFieldPolicy) -> RegistryResult<Self> {
        Ok(Self {
            store,
            users: FieldRegistry::users()?,
            calendar: FieldRegistry::calendar()?,
            policy,
        })
    }

    /// State over an empty in-memory store
    pub fn in_memory(policy: UnknownFieldPolicy) -> RegistryResult<Self> {
        Self::new(Arc::new(MemoryStore::new()), policy)
    }

    /// Compile request parameters against a registry into a filter document
    pub fn compile_filter(
        &self,
        registry: &FieldRegistry,
        params: &[(String, String)],
    ) -> RestResult<FilterDocument> {
        let filter = QueryCompiler::new(registry)
            .with_policy(self.policy)
            .compile(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .map_err(RestError::InvalidFilter)?;

        let doc = serialize(&filter);
        debug!(
            collection = registry.collection(),
            terms = filter.len(),
            filter = %doc,
            "compiled filter"
        );
        Ok(doc)
    }
}

/// Routes for `/user` and `/date`
pub fn rest_routes(state: Arc<RestState>) -> Router {
    Router::new()
        .route("/user", get(get_user).post(put_user).delete(delete_user))
        .route("/user/list", get(list_users))
        .route("/date", get(get_date).post(put_date).delete(delete_date))
        .route("/date/list", get(list_dates))
        .with_state(state)
}
