//! The catalog client against a loopback server.

#![allow(clippy::unwrap_used)]

use axum::http::Method;
use shopfront_cart::{CatalogClient, CatalogError};
use shopfront_core::{Price, ProductId};
use shopfront_integration_tests::{CannedServer, config_with};

fn catalog_for(server: &CannedServer) -> CatalogClient {
    let config = config_with(&[("SHOPFRONT_CATALOG_URL", server.url("/api"))]);
    CatalogClient::new(&config.api).unwrap()
}

#[tokio::test]
async fn test_get_product_is_cached() {
    let server = CannedServer::start(
        200,
        r#"{"id": 7, "title": "Lamp", "price": 24.5, "thumbnail": "https://img/7.png", "brand": "Lumi"}"#,
    )
    .await;
    let catalog = catalog_for(&server);

    let first = catalog.get_product(ProductId::new(7)).await.unwrap();
    let second = catalog.get_product(ProductId::new(7)).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.price, Price::from_cents(2450));
    assert_eq!(first.extra.get("brand"), Some(&serde_json::json!("Lumi")));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = requests.first().unwrap();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.uri.path(), "/api/products/7");
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let server = CannedServer::start(404, r#"{"message": "Product with id '999' not found"}"#).await;
    let catalog = catalog_for(&server);

    let err = catalog.get_product(ProductId::new(999)).await.unwrap_err();

    assert!(matches!(err, CatalogError::NotFound(id) if id == ProductId::new(999)));
}

#[tokio::test]
async fn test_list_products_sends_limit() {
    let server = CannedServer::start(
        200,
        r#"{"products": [{"id": 1, "title": "A", "price": 1}], "total": 1, "skip": 0, "limit": 3}"#,
    )
    .await;
    let catalog = catalog_for(&server);

    let products = catalog.list_products(3).await.unwrap();

    assert_eq!(products.len(), 1);
    let requests = server.requests();
    let request = requests.first().unwrap();
    assert_eq!(request.uri.path(), "/api/products");
    assert_eq!(request.uri.query(), Some("limit=3"));
}
