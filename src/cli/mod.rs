//! CLI module for remindal
//!
//! Provides command-line interface for:
//! - serve: Load configuration and run the HTTP server
//! - filter: Compile filter parameters offline and print the store filter

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Collection, Command};
pub use commands::{compile_params, filter, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_json};
