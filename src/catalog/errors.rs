//! # Catalog Errors
//!
//! Error taxonomy for the product listing and its HTTP rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog errors
///
/// Both kinds are terminal for the request and render identically apart
/// from the message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Opening the database connection failed
    #[error("Database connection failed: {0}")]
    DatabaseConnection(String),

    /// Running the product query failed
    #[error("Query failed: {0}")]
    QueryExecution(String),
}

impl CatalogError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::DatabaseConnection(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::QueryExecution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl From<&CatalogError> for ErrorResponse {
    fn from(err: &CatalogError) -> Self {
        Self::new(err.to_string())
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
