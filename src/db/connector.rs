//! # Connector Traits
//!
//! The listing handler depends only on these traits, never on concrete
//! credentials or a concrete driver.

use std::future::Future;

use super::errors::DbResult;
use super::row::ResultSet;

/// Opens database connections from injected configuration
pub trait Connector: Send + Sync + 'static {
    /// Connection type produced by this connector
    type Connection: Connection;

    /// Open a fresh connection
    fn connect(&self) -> impl Future<Output = DbResult<Self::Connection>> + Send;
}

/// A single open connection, owned by one request
///
/// Dropping a connection releases it as well; `close` is the graceful path.
pub trait Connection: Send {
    /// Run a read-only statement and drain every row in database order
    fn fetch_rows(&mut self, sql: &str) -> impl Future<Output = DbResult<ResultSet>> + Send;

    /// Release the connection
    fn close(self) -> impl Future<Output = ()> + Send;
}
