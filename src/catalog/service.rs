//! # Product Catalog
//!
//! The fixed product query with scoped connection acquisition.

use crate::db::{Connection, Connector, ResultSet};

use super::errors::{CatalogError, CatalogResult};

/// Read query behind the listing endpoint
pub const PRODUCTS_QUERY: &str = "SELECT * FROM products";

/// Lists the `products` table through an injected connector
#[derive(Debug)]
pub struct ProductCatalog<C: Connector> {
    connector: C,
}

impl<C: Connector> ProductCatalog<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Get the underlying connector
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Fetch every product row in database order
    ///
    /// One connection is opened per call and released on every path that
    /// follows a successful connect. If the returned future is dropped
    /// mid-query, dropping the connection releases it.
    pub async fn list_products(&self) -> CatalogResult<ResultSet> {
        let mut conn = self
            .connector
            .connect()
            .await
            .map_err(|e| CatalogError::DatabaseConnection(e.to_string()))?;

        let result = conn.fetch_rows(PRODUCTS_QUERY).await;
        conn.close().await;

        result.map_err(|e| CatalogError::QueryExecution(e.to_string()))
    }
}
