//! CLI argument definitions using clap
//!
//! Commands:
//! - catalog-api serve [--config <path>] [--port <port>]
//! - catalog-api query [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// catalog-api - JSON product catalog endpoint
#[derive(Parser, Debug)]
#[command(name = "catalog-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Serve the product listing over HTTP
    Serve {
        /// Path to JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides http.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List products once to stdout and exit
    Query {
        /// Path to JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["catalog-api", "serve", "--config", "catalog.json", "--port", "9000"])
            .unwrap();
        assert_eq!(
            cli.command,
            Command::Serve {
                config: Some(PathBuf::from("catalog.json")),
                port: Some(9000),
            }
        );
    }

    #[test]
    fn test_parse_query_without_config() {
        let cli = Cli::try_parse_from(["catalog-api", "query"]).unwrap();
        assert_eq!(cli.command, Command::Query { config: None });
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["catalog-api", "serve", "--port", "http"]).is_err());
    }
}
