//! # Catalog Module
//!
//! Product listing over any `Connector`, and the errors it reports.

pub mod errors;
pub mod service;

pub use errors::{CatalogError, CatalogResult, ErrorResponse};
pub use service::{ProductCatalog, PRODUCTS_QUERY};
