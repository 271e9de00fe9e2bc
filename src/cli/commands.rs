//! CLI command implementations
//!
//! Each command loads configuration, installs logging, then builds its own
//! tokio runtime.

use std::path::Path;

use tokio::runtime::Runtime;

use crate::catalog::{ErrorResponse, ProductCatalog};
use crate::config::Config;
use crate::db::MySqlConnector;
use crate::http_server::HttpServer;
use crate::logging::init_logging;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Query { config } => query(config.as_deref()),
    }
}

/// Load configuration and apply the `--port` override
pub fn load_config(config_path: Option<&Path>, port: Option<u16>) -> CliResult<Config> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }
    Ok(config)
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Serve the product listing over HTTP until Ctrl-C / SIGTERM
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let config = load_config(config_path, port)?;
    init_logging(&config.logging);

    let connector = MySqlConnector::new(&config.database);
    tracing::info!(database = %connector.target(), user = %config.database.user, "catalog database configured");

    let server = HttpServer::new(config.http.clone(), ProductCatalog::new(connector))
        .map_err(|e| CliError::config_error(e.to_string()))?;

    runtime()?.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Run the product query once and print the JSON result
///
/// On failure the `{"error": ...}` object is printed as well, and the
/// command fails.
pub fn query(config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path, None)?;
    init_logging(&config.logging);

    let catalog = ProductCatalog::new(MySqlConnector::new(&config.database));

    match runtime()?.block_on(catalog.list_products()) {
        Ok(rows) => write_json(&rows),
        Err(e) => {
            write_json(&ErrorResponse::from(&e))?;
            Err(CliError::query_failed(e.to_string()))
        }
    }
}
