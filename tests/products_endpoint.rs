//! Product Endpoint Tests
//!
//! Drives the full router in-process against an in-memory connector:
//! - success payloads (populated, empty, ordering, idempotence)
//! - the two failure kinds and their JSON bodies
//! - response headers on every outcome
//! - connection release on every path

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use catalog_api::catalog::ProductCatalog;
use catalog_api::db::{MemoryConnector, MemoryOutcome, ResultSet, Row};
use catalog_api::http_server::{HttpServer, HttpServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

fn product(id: i64, name: &str, price: &str) -> Row {
    let mut row = Row::new();
    row.insert("id".to_string(), json!(id));
    row.insert("name".to_string(), json!(name));
    row.insert("price".to_string(), json!(price));
    row.insert("image_url".to_string(), Value::Null);
    row
}

fn sample_products() -> ResultSet {
    vec![
        product(3, "Desk Lamp", "24.50"),
        product(1, "Notebook", "3.99"),
        product(2, "Fountain Pen", "89.00"),
    ]
}

fn app_with_config(connector: MemoryConnector, config: HttpServerConfig) -> Router {
    HttpServer::new(config, ProductCatalog::new(connector))
        .expect("server builds")
        .router()
}

fn app(connector: MemoryConnector) -> Router {
    app_with_config(connector, HttpServerConfig::default())
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    raw: String,
    body: Value,
}

async fn send(router: Router, method: Method, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let raw = String::from_utf8(bytes.to_vec()).unwrap();
    let body = serde_json::from_str(&raw).unwrap();

    TestResponse {
        status,
        headers,
        raw,
        body,
    }
}

async fn get(router: Router, uri: &str) -> TestResponse {
    send(router, Method::GET, uri).await
}

fn assert_standard_headers(headers: &HeaderMap, origin: &str) {
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["access-control-allow-origin"], origin);
    assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert_eq!(headers.get_all("access-control-allow-origin").iter().count(), 1);
    assert_eq!(headers.get_all("content-type").iter().count(), 1);
}

// =============================================================================
// Success Path
// =============================================================================

#[tokio::test]
async fn test_populated_table_returns_all_rows() {
    let response = get(app(MemoryConnector::with_rows(sample_products())), "/products").await;

    assert_eq!(response.status, StatusCode::OK);
    let rows = response.body.as_array().expect("top-level array");
    assert_eq!(rows.len(), 3);
    for row in rows {
        let keys: Vec<&String> = row.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["id", "name", "price", "image_url"]);
    }
}

#[tokio::test]
async fn test_empty_table_returns_empty_array() {
    let response = get(app(MemoryConnector::with_rows(vec![])), "/products").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.raw, "[]");
    assert_standard_headers(&response.headers, "*");
}

#[tokio::test]
async fn test_row_order_is_database_order() {
    let response = get(app(MemoryConnector::with_rows(sample_products())), "/products").await;

    let ids: Vec<i64> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[tokio::test]
async fn test_scalar_values_pass_through() {
    let response = get(app(MemoryConnector::with_rows(sample_products())), "/products").await;

    assert_eq!(
        response.body[0],
        json!({"id": 3, "name": "Desk Lamp", "price": "24.50", "image_url": null})
    );
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let router = app(MemoryConnector::with_rows(sample_products()));

    let first = get(router.clone(), "/products").await;
    let second = get(router, "/products").await;

    assert_eq!(first.raw, second.raw);
}

#[tokio::test]
async fn test_all_methods_are_handled_alike() {
    let connector = MemoryConnector::with_rows(sample_products());
    let router = app(connector.clone());

    let via_get = send(router.clone(), Method::GET, "/products").await;
    let via_post = send(router.clone(), Method::POST, "/products").await;
    let via_options = send(router, Method::OPTIONS, "/products").await;

    for response in [&via_post, &via_options] {
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.raw, via_get.raw);
        assert_standard_headers(&response.headers, "*");
    }
    assert_eq!(connector.stats().opened(), 3);
}

// =============================================================================
// Failure Paths
// =============================================================================

#[tokio::test]
async fn test_connection_failure_returns_500() {
    let connector = MemoryConnector::new(MemoryOutcome::ConnectFailure(
        "Access denied for user 'root'@'localhost' (using password: NO)".to_string(),
    ));
    let response = get(app(connector.clone()), "/products").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({"error": "Database connection failed: Access denied for user 'root'@'localhost' (using password: NO)"})
    );
    assert_standard_headers(&response.headers, "*");
    assert_eq!(connector.stats().opened(), 0);
}

#[tokio::test]
async fn test_query_failure_returns_500_and_releases() {
    let connector = MemoryConnector::new(MemoryOutcome::QueryFailure(
        "Table 'flut_proj.products' doesn't exist".to_string(),
    ));
    let response = get(app(connector.clone()), "/products").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({"error": "Query failed: Table 'flut_proj.products' doesn't exist"})
    );
    assert_standard_headers(&response.headers, "*");
    assert_eq!(connector.stats().opened(), 1);
    assert_eq!(connector.stats().closed(), 1);
}

#[tokio::test]
async fn test_recovery_after_database_returns() {
    let connector = MemoryConnector::new(MemoryOutcome::ConnectFailure("refused".to_string()));
    let router = app(connector.clone());

    let down = get(router.clone(), "/products").await;
    assert_eq!(down.status, StatusCode::INTERNAL_SERVER_ERROR);

    connector
        .set_outcome(MemoryOutcome::Rows(sample_products()))
        .unwrap();
    let up = get(router, "/products").await;
    assert_eq!(up.status, StatusCode::OK);
    assert_eq!(up.body.as_array().unwrap().len(), 3);
}

// =============================================================================
// Connection Lifecycle
// =============================================================================

#[tokio::test]
async fn test_one_connection_per_request_always_released() {
    let connector = MemoryConnector::with_rows(sample_products());
    let router = app(connector.clone());

    for _ in 0..5 {
        get(router.clone(), "/products").await;
    }

    assert_eq!(connector.stats().opened(), 5);
    assert_eq!(connector.stats().closed(), 5);
    assert_eq!(
        connector.stats().queries(),
        vec!["SELECT * FROM products".to_string(); 5]
    );
}

// =============================================================================
// Headers, Health, Fallback
// =============================================================================

#[tokio::test]
async fn test_configured_origin_replaces_wildcard() {
    let config = HttpServerConfig {
        cors_origin: "https://shop.example.com".to_string(),
        ..Default::default()
    };
    let router = app_with_config(MemoryConnector::with_rows(vec![]), config);

    let response = get(router, "/products").await;
    assert_standard_headers(&response.headers, "https://shop.example.com");
}

#[tokio::test]
async fn test_health_does_not_touch_database() {
    let connector = MemoryConnector::new(MemoryOutcome::ConnectFailure("down".to_string()));
    let response = get(app(connector.clone()), "/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["version"], env!("CARGO_PKG_VERSION"));
    assert_standard_headers(&response.headers, "*");
    assert_eq!(connector.stats().opened(), 0);
}

#[tokio::test]
async fn test_unknown_path_is_json_404() {
    let response = get(app(MemoryConnector::with_rows(vec![])), "/nope").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({"error": "Not found"}));
    assert_standard_headers(&response.headers, "*");
}
