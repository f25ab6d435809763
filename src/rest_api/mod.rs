//! # REST API Module
//!
//! HTTP endpoints for the `users` and `calendar` collections. List endpoints
//! compile their query parameters into a store filter.

pub mod dates;
pub mod errors;
pub mod response;
pub mod server;
pub mod users;

pub use errors::{RestError, RestResult};
pub use response::{ApiResponse, ErrorDetail};
pub use server::{rest_routes, RestState};
