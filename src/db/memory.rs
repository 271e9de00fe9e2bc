//! # In-Memory Connector
//!
//! `Connector` that serves a scripted outcome instead of talking to a server.
//! Counts opened and closed connections so callers can check release.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use super::connector::{Connection, Connector};
use super::errors::{DbError, DbResult};
use super::row::ResultSet;

/// What the next connection attempt produces
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryOutcome {
    /// Connect succeeds and the query returns these rows
    Rows(ResultSet),
    /// Connect fails with this driver message
    ConnectFailure(String),
    /// Connect succeeds, the query fails with this driver message
    QueryFailure(String),
}

/// Connection accounting shared between a connector and its connections
#[derive(Debug, Default)]
pub struct ConnectionStats {
    opened: AtomicUsize,
    closed: AtomicUsize,
    queries: RwLock<Vec<String>>,
}

impl ConnectionStats {
    /// Connections handed out
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Connections released through `close`
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Statements executed, in order
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .read()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

/// In-memory connector
///
/// Cloning shares the outcome and the stats.
#[derive(Debug, Clone)]
pub struct MemoryConnector {
    outcome: Arc<RwLock<MemoryOutcome>>,
    stats: Arc<ConnectionStats>,
}

impl MemoryConnector {
    pub fn new(outcome: MemoryOutcome) -> Self {
        Self {
            outcome: Arc::new(RwLock::new(outcome)),
            stats: Arc::new(ConnectionStats::default()),
        }
    }

    /// Connector whose query returns `rows`
    pub fn with_rows(rows: ResultSet) -> Self {
        Self::new(MemoryOutcome::Rows(rows))
    }

    /// Replace the outcome for subsequent connections
    pub fn set_outcome(&self, outcome: MemoryOutcome) -> DbResult<()> {
        let mut current = self
            .outcome
            .write()
            .map_err(|_| DbError::Connect("Lock poisoned".to_string()))?;
        *current = outcome;
        Ok(())
    }

    pub fn stats(&self) -> &ConnectionStats {
        &self.stats
    }
}

impl Connector for MemoryConnector {
    type Connection = MemoryConn;

    async fn connect(&self) -> DbResult<MemoryConn> {
        let outcome = self
            .outcome
            .read()
            .map_err(|_| DbError::Connect("Lock poisoned".to_string()))?
            .clone();

        let result = match outcome {
            MemoryOutcome::ConnectFailure(msg) => return Err(DbError::Connect(msg)),
            MemoryOutcome::Rows(rows) => Ok(rows),
            MemoryOutcome::QueryFailure(msg) => Err(DbError::Query(msg)),
        };

        self.stats.opened.fetch_add(1, Ordering::SeqCst);
        Ok(MemoryConn {
            result,
            stats: Arc::clone(&self.stats),
        })
    }
}

/// Connection handed out by `MemoryConnector`
#[derive(Debug)]
pub struct MemoryConn {
    result: DbResult<ResultSet>,
    stats: Arc<ConnectionStats>,
}

impl Connection for MemoryConn {
    async fn fetch_rows(&mut self, sql: &str) -> DbResult<ResultSet> {
        if let Ok(mut queries) = self.stats.queries.write() {
            queries.push(sql.to_string());
        }
        self.result.clone()
    }

    async fn close(self) {
        self.stats.closed.fetch_add(1, Ordering::SeqCst);
    }
}
