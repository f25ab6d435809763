//! Observability for remindal
//!
//! Structured logging through `tracing`. The filter comes from `RUST_LOG`
//! when set, otherwise from the configured level.
//!
//! # Usage
//!
//! ```ignore
//! remindal::observability::init_logging("debug");
//! tracing::info!(port = 8080, "listening");
//! ```

use tracing_subscriber::EnvFilter;

/// Levels accepted for the `log_level` setting
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Build the filter directive for a configured level
fn default_directive(level: &str) -> String {
    format!("{level},tower_http={level}")
}

/// Resolve the active filter: `RUST_LOG` first, then `level`
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)))
}

/// Install the global subscriber.
///
/// Returns false when a subscriber was already installed (tests, embedding).
pub fn init_logging(level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .compact()
        .with_env_filter(env_filter(level))
        .try_init()
        .is_ok()
}

/// Whether `level` names a known log level
pub fn is_valid_level(level: &str) -> bool {
    LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
}
