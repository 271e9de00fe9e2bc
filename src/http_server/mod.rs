//! # HTTP Server Module
//!
//! axum server exposing the product catalog.
//!
//! # Endpoints
//!
//! - `/products` - every row of the `products` table as a JSON array
//! - `/health` - liveness check
//!
//! Every response carries `Content-Type: application/json` and the CORS
//! headers.

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod products_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{HttpServerError, HttpServerResult};
pub use server::HttpServer;
