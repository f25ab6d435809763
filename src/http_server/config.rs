//! HTTP Server Configuration
//!
//! Host, port, CORS, filter strictness and log level. Loaded from a JSON
//! file; every field has a default so a partial or missing file is valid.

use std::fs;
use std::io;
use std::path::Path;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::is_valid_level;
use crate::query::UnknownFieldPolicy;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] io::Error),

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Reject unknown filter keys (default: true)
    #[serde(default = "default_strict_filters")]
    pub strict_filters: bool,

    /// Log level used when `RUST_LOG` is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_strict_filters() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            strict_filters: default_strict_filters(),
            log_level: default_log_level(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e.into()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }

        if !is_valid_level(&self.log_level) {
            return Err(ConfigError::Invalid(format!(
                "unknown log_level '{}'",
                self.log_level
            )));
        }

        if let Some(bad) = self
            .cors_origins
            .iter()
            .find(|origin| origin.parse::<HeaderValue>().is_err())
        {
            return Err(ConfigError::Invalid(format!("invalid CORS origin '{}'", bad)));
        }

        Ok(())
    }

    /// Policy applied to filter keys the registries do not know
    pub fn filter_policy(&self) -> UnknownFieldPolicy {
        if self.strict_filters {
            UnknownFieldPolicy::Reject
        } else {
            UnknownFieldPolicy::Ignore
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
