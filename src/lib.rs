//! catalog-api - JSON product catalog endpoint backed by a relational table
//!
//! One route lists every row of the `products` table as a JSON array.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod http_server;
pub mod logging;
