//! CLI argument definitions using clap
//!
//! Commands:
//! - remindal serve --config <path> [--port <port>]
//! - remindal filter --collection <users|calendar> [--lenient] key=value...

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// remindal - users and calendar REST service
#[derive(Parser, Debug)]
#[command(name = "remindal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./remindal.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Compile filter parameters and print the store filter
    Filter {
        /// Collection whose fields the parameters name
        #[arg(long, value_enum)]
        collection: Collection,

        /// Skip unknown keys instead of rejecting them
        #[arg(long)]
        lenient: bool,

        /// Parameters as key=value, e.g. age=18%-65
        params: Vec<String>,
    },
}

/// Collections with a filter registry
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    Users,
    Calendar,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
