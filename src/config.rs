//! Service configuration
//!
//! Loaded in order of precedence:
//! 1. Environment variables (`CATALOG_*`)
//! 2. JSON config file, when one is given
//! 3. Defaults
//!
//! Every field of the file is optional.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DatabaseConfig;
use crate::http_server::HttpServerConfig;
use crate::logging::LoggingConfig;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {message}")]
    Read { path: String, message: String },

    /// Config file is not valid JSON for this schema
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// An environment override could not be parsed
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    /// A field holds an unusable value
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load from an optional file, apply environment overrides, validate
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|var| env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config file without overrides or validation
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply `CATALOG_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("CATALOG_DB_HOST") {
            self.database.host = v;
        }
        if let Some(v) = lookup("CATALOG_DB_PORT") {
            self.database.port = parse_port("CATALOG_DB_PORT", v)?;
        }
        if let Some(v) = lookup("CATALOG_DB_USER") {
            self.database.user = v;
        }
        if let Some(v) = lookup("CATALOG_DB_PASSWORD") {
            self.database.password = v;
        }
        if let Some(v) = lookup("CATALOG_DB_NAME") {
            self.database.name = v;
        }
        if let Some(v) = lookup("CATALOG_HTTP_HOST") {
            self.http.host = v;
        }
        if let Some(v) = lookup("CATALOG_HTTP_PORT") {
            self.http.port = parse_port("CATALOG_HTTP_PORT", v)?;
        }
        if let Some(v) = lookup("CATALOG_CORS_ORIGIN") {
            self.http.cors_origin = v;
        }
        if let Some(v) = lookup("CATALOG_LOG_LEVEL") {
            self.logging.level = v;
        }
        Ok(())
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.host.trim().is_empty() {
            return Err(ConfigError::Invalid("database.host must not be empty".to_string()));
        }
        if self.database.name.trim().is_empty() {
            return Err(ConfigError::Invalid("database.name must not be empty".to_string()));
        }
        if self.database.connect_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "database.connect_timeout_ms must be > 0".to_string(),
            ));
        }
        if self.database.query_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "database.query_timeout_ms must be > 0".to_string(),
            ));
        }
        if self.http.cors_origin_value().is_err() {
            return Err(ConfigError::Invalid(format!(
                "http.cors_origin is not a valid header value: {:?}",
                self.http.cors_origin
            )));
        }
        Ok(())
    }
}

fn parse_port(var: &'static str, value: String) -> ConfigResult<u16> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}
