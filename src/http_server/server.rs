//! # HTTP Server
//!
//! Combines the product and health routers, stamps the JSON and CORS
//! headers on every response, and runs until Ctrl-C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE,
};
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::catalog::{ErrorResponse, ProductCatalog};
use crate::db::Connector;

use super::config::HttpServerConfig;
use super::errors::{HttpServerError, HttpServerResult};
use super::observability_routes::health_routes;
use super::products_routes::products_routes;

/// Methods advertised to browsers
pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

/// Request headers advertised to browsers
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// HTTP server for the product catalog
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server serving `catalog`
    pub fn new<C: Connector>(
        config: HttpServerConfig,
        catalog: ProductCatalog<C>,
    ) -> HttpServerResult<Self> {
        let router = Self::build_router(&config, Arc::new(catalog))?;
        Ok(Self { config, router })
    }

    /// Build the combined router with all endpoints
    fn build_router<C: Connector>(
        config: &HttpServerConfig,
        catalog: Arc<ProductCatalog<C>>,
    ) -> HttpServerResult<Router> {
        let cors_origin = config
            .cors_origin_value()
            .map_err(|_| HttpServerError::InvalidCorsOrigin(config.cors_origin.clone()))?;

        // Overriding, so error and fallback responses carry them too.
        let headers = ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::overriding(
                CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_ORIGIN,
                cors_origin,
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOWED_METHODS),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOWED_HEADERS),
            ));

        Ok(Router::new()
            .merge(health_routes())
            .merge(products_routes(catalog))
            .fallback(not_found_handler)
            .layer(headers)
            .layer(TraceLayer::new_for_http()))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server and serve until a shutdown signal arrives
    pub async fn start(self) -> HttpServerResult<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|_| HttpServerError::InvalidAddress(self.config.socket_addr()))?;

        let listener = TcpListener::bind(addr).await?;

        tracing::info!(%addr, cors_origin = %self.config.cors_origin, "catalog server listening");
        if self.config.cors_origin == "*" {
            tracing::warn!("CORS allows any origin; set http.cors_origin for production");
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("catalog server stopped");
        Ok(())
    }
}

async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
