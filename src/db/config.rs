//! Database Configuration
//!
//! Connection target and credentials for the catalog database.

use serde::{Deserialize, Serialize};

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host (default: "localhost")
    #[serde(default = "default_host")]
    pub host: String,

    /// Database port (default: 3306)
    #[serde(default = "default_port")]
    pub port: u16,

    /// User name (default: "root")
    #[serde(default = "default_user")]
    pub user: String,

    /// Password (default: empty)
    #[serde(default)]
    pub password: String,

    /// Database name (default: "flut_proj")
    #[serde(default = "default_name")]
    pub name: String,

    /// Connection acquisition deadline in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Query execution deadline in milliseconds
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_user() -> String {
    "root".to_string()
}

fn default_name() -> String {
    "flut_proj".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_query_timeout_ms() -> u64 {
    30_000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: String::new(),
            name: default_name(),
            connect_timeout_ms: default_connect_timeout_ms(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// `host:port/name`, without credentials, for log lines
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.name)
    }
}
