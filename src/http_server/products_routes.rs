//! Product HTTP Routes
//!
//! `/products` answers every method the same way: list the whole table.

use std::sync::Arc;

use axum::{extract::State, routing::any, Json, Router};

use crate::catalog::{CatalogError, ProductCatalog};
use crate::db::{Connector, ResultSet};

/// Create product routes
pub fn products_routes<C: Connector>(catalog: Arc<ProductCatalog<C>>) -> Router {
    Router::new()
        .route("/products", any(list_products_handler::<C>))
        .with_state(catalog)
}

async fn list_products_handler<C: Connector>(
    State(catalog): State<Arc<ProductCatalog<C>>>,
) -> Result<Json<ResultSet>, CatalogError> {
    match catalog.list_products().await {
        Ok(rows) => {
            tracing::debug!(rows = rows.len(), "products listed");
            Ok(Json(rows))
        }
        Err(e) => {
            tracing::warn!(error = %e, "product listing failed");
            Err(e)
        }
    }
}
