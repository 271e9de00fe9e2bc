//! HTTP server errors

use std::io;

use thiserror::Error;

/// Result type for server lifecycle operations
pub type HttpServerResult<T> = Result<T, HttpServerError>;

/// HTTP server errors
#[derive(Debug, Error)]
pub enum HttpServerError {
    /// `cors_origin` cannot be sent as a header value
    #[error("Invalid CORS origin: {0:?}")]
    InvalidCorsOrigin(String),

    /// `host:port` does not parse as a socket address
    #[error("Invalid socket address: {0}")]
    InvalidAddress(String),

    /// Binding or serving failed
    #[error("HTTP server I/O error: {0}")]
    Io(#[from] io::Error),
}
