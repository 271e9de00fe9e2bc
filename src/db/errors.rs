//! # Database Errors
//!
//! Error types for connector implementations.

use thiserror::Error;

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Database errors
///
/// Both variants carry the message reported by the driver, unprefixed.
/// Callers decide how to present them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DbError {
    /// Opening a connection failed
    #[error("{0}")]
    Connect(String),

    /// Executing a statement or decoding its rows failed
    #[error("{0}")]
    Query(String),
}

impl DbError {
    /// Connection acquisition exceeded its deadline
    pub fn connect_timeout(timeout_ms: u64) -> Self {
        DbError::Connect(format!("connection timed out after {} ms", timeout_ms))
    }

    /// Query execution exceeded its deadline
    pub fn query_timeout(timeout_ms: u64) -> Self {
        DbError::Query(format!("query timed out after {} ms", timeout_ms))
    }

    /// The driver message
    pub fn message(&self) -> &str {
        match self {
            DbError::Connect(msg) | DbError::Query(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_driver_message() {
        let err = DbError::Connect("Access denied for user 'root'@'localhost'".to_string());
        assert_eq!(err.to_string(), "Access denied for user 'root'@'localhost'");
        assert_eq!(err.message(), "Access denied for user 'root'@'localhost'");
    }

    #[test]
    fn test_timeouts() {
        assert_eq!(
            DbError::connect_timeout(5000),
            DbError::Connect("connection timed out after 5000 ms".to_string())
        );
        assert_eq!(
            DbError::query_timeout(250).message(),
            "query timed out after 250 ms"
        );
    }
}
