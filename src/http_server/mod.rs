//! # HTTP Server Module
//!
//! Serves the REST API over axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/user`, `/user/list` - Users
//! - `/date`, `/date/list` - Calendar entries

pub mod config;
pub mod health_routes;
pub mod server;

pub use config::{ConfigError, HttpServerConfig};
pub use server::HttpServer;
