//! # Database Module
//!
//! Connector capability used by the catalog, plus its MySQL implementation.
//!
//! - `Connector` / `Connection` - the abstract seam
//! - `MySqlConnector` - `sqlx` backed implementation
//! - `MemoryConnector` - scripted in-process implementation
//! - `Row` / `ResultSet` - schema-less row model

pub mod config;
pub mod connector;
pub mod errors;
pub mod memory;
pub mod mysql;
pub mod row;

pub use config::DatabaseConfig;
pub use connector::{Connection, Connector};
pub use errors::{DbError, DbResult};
pub use memory::{ConnectionStats, MemoryConnector, MemoryOutcome};
pub use mysql::{MySqlConn, MySqlConnector};
pub use row::{ResultSet, Row};
