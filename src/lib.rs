//! remindal - users and calendar REST service
//!
//! HTTP query parameters are compiled into typed, validated filters and
//! rendered as document-store filter documents.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod rest_api;
pub mod schema;
pub mod storage;
