//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::init_logging;
use crate::query::{
    serialize, CompileErrors, FieldRegistry, FilterDocument, QueryCompiler, UnknownFieldPolicy,
};
use crate::rest_api::{ErrorDetail, RestState};
use crate::storage::MemoryStore;

use super::args::{Collection, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_json};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Filter {
            collection,
            lenient,
            params,
        } => filter(collection, lenient, &params),
    }
}

/// Load configuration and serve the REST API until stopped
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = HttpServerConfig::load(config_path)?;
    if let Some(port) = port {
        config.port = port;
    }

    init_logging(&config.log_level);
    info!(config = %config_path.display(), "configuration loaded");

    let state = RestState::new(Arc::new(MemoryStore::new()), config.filter_policy())?;
    let server = HttpServer::with_state(config, Arc::new(state));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Compile `key=value` arguments and print the resulting filter document.
///
/// On rejection the errors are printed to stdout and the command fails.
pub fn filter(collection: Collection, lenient: bool, params: &[String]) -> CliResult<()> {
    let policy = if lenient {
        UnknownFieldPolicy::Ignore
    } else {
        UnknownFieldPolicy::Reject
    };

    match compile_params(collection, policy, params)? {
        Ok(doc) => write_json(&doc),
        Err(errors) => {
            let details: Vec<ErrorDetail> =
                errors.errors().iter().map(ErrorDetail::from).collect();
            let err = CliError::filter_rejected(details.len());
            write_error(err.code_str(), err.message(), &details)?;
            Err(err)
        }
    }
}

/// Compile arguments against a collection's registry.
///
/// The outer result carries argument and registry failures, the inner one
/// the filter errors.
pub fn compile_params(
    collection: Collection,
    policy: UnknownFieldPolicy,
    params: &[String],
) -> CliResult<Result<FilterDocument, CompileErrors>> {
    let registry = match collection {
        Collection::Users => FieldRegistry::users()?,
        Collection::Calendar => FieldRegistry::calendar()?,
    };

    let pairs = params
        .iter()
        .map(|p| split_param(p))
        .collect::<CliResult<Vec<_>>>()?;

    Ok(QueryCompiler::new(&registry)
        .with_policy(policy)
        .compile(pairs)
        .map(|filter| serialize(&filter)))
}

/// Split `key=value` on the first '='
fn split_param(param: &str) -> CliResult<(&str, &str)> {
    param
        .split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| CliError::invalid_argument(format!("expected key=value, got '{}'", param)))
}
