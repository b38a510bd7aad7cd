//! Product catalog client.
//!
//! Reads product records from a DummyJSON-style REST catalog so front ends
//! have something to add to the cart. Single products are cached using
//! `moka` (5-minute TTL); listings are always fetched fresh.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use serde::Deserialize;
use shopfront_core::{Product, ProductId};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CommerceApiConfig;

/// Errors that can occur when reading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Product does not exist.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Failed to build a request URL or parse a response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Listing response wrapper.
#[derive(Debug, Deserialize)]
struct ProductList {
    products: Vec<Product>,
}

/// Client for the product catalog.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<ProductId, Product>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CommerceApiConfig) -> Result<Self, CatalogError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.catalog_url.clone(),
                cache,
            }),
        })
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for unknown IDs, or another error if
    /// the request fails.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.inner.cache.get(&id).await {
            debug!("Cache hit for product {id}");
            return Ok(product);
        }

        let url = self.url(&format!("products/{id}"))?;
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let product: Product = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        self.inner.cache.insert(id, product.clone()).await;
        Ok(product)
    }

    /// Fetch the first `limit` products of the catalog.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_products(&self, limit: u32) -> Result<Vec<Product>, CatalogError> {
        let mut url = self.url("products")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let list: ProductList = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        debug!(count = list.products.len(), "fetched product listing");
        Ok(list.products)
    }

    /// Resolve `path` against the catalog base URL.
    fn url(&self, path: &str) -> Result<Url, CatalogError> {
        resolve(&self.inner.base_url, path)
    }
}

/// Join `path` onto `base`, treating `base` as a directory even without a
/// trailing slash.
fn resolve(base: &Url, path: &str) -> Result<Url, CatalogError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    base.join(path).map_err(|e| CatalogError::Parse(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_trailing_slash() {
        let base = Url::parse("https://dummyjson.com").unwrap();
        assert_eq!(
            resolve(&base, "products/1").unwrap().as_str(),
            "https://dummyjson.com/products/1"
        );

        let nested = Url::parse("http://localhost:9000/api/v1").unwrap();
        assert_eq!(
            resolve(&nested, "products").unwrap().as_str(),
            "http://localhost:9000/api/v1/products"
        );
    }

    #[test]
    fn test_resolve_with_trailing_slash() {
        let base = Url::parse("http://localhost:9000/api/").unwrap();
        assert_eq!(
            resolve(&base, "products/7").unwrap().as_str(),
            "http://localhost:9000/api/products/7"
        );
    }

    #[test]
    fn test_product_list_parses() {
        let json = r#"{
            "products": [
                {"id": 1, "title": "A", "price": 9.99, "thumbnail": "https://img/1.png"},
                {"id": 2, "title": "B", "price": 19.99, "thumbnail": "https://img/2.png"}
            ],
            "total": 194,
            "skip": 0,
            "limit": 2
        }"#;

        let list: ProductList = serde_json::from_str(json).unwrap();
        assert_eq!(list.products.len(), 2);
        assert_eq!(list.products[1].id, ProductId::new(2));
    }
}
