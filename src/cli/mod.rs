//! CLI module for catalog-api
//!
//! Provides command-line interface for:
//! - serve: run the HTTP server
//! - query: one-shot product listing to stdout

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{load_config, query, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_json, write_json_to};
