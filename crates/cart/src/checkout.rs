//! Order creation against the commerce API.
//!
//! On checkout the cart is sent as one request:
//!
//! ```json
//! { "userId": 1, "products": [{ "id": 144, "quantity": 4 }] }
//! ```
//!
//! Any 2xx response carrying a JSON body with an order `id` is a success.
//! Everything else, including transport failures and timeouts, is reported
//! as a [`CheckoutError`]. There are no retries.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use shopfront_core::{LineItem, OrderId, Price, ProductId, Quantity, UserId};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CommerceApiConfig;

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// HTTP request failed (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response body.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A client could not be constructed from configuration.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

/// One product and quantity in an order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub id: ProductId,
    pub quantity: Quantity,
}

impl From<&LineItem> for OrderLine {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id,
            quantity: item.quantity,
        }
    }
}

/// Request body for order creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest<'a> {
    pub user_id: UserId,
    pub products: &'a [OrderLine],
}

/// The part of the order creation response the cart cares about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// Identifier of the created order.
    pub id: OrderId,
    /// Order total as computed by the API.
    #[serde(default)]
    pub total: Option<Price>,
    /// Units in the order as counted by the API.
    #[serde(default)]
    pub total_quantity: Option<u64>,
}

/// Something that can turn order lines into an order.
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Create an order for `lines`, in the given order.
    async fn create_order(&self, lines: &[OrderLine]) -> Result<OrderConfirmation, CheckoutError>;
}

/// `reqwest`-backed [`OrderApi`] for a JSON order endpoint.
#[derive(Clone)]
pub struct HttpOrderClient {
    client: reqwest::Client,
    endpoint: Url,
    user_id: UserId,
}

impl HttpOrderClient {
    /// Create a new order client.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &CommerceApiConfig) -> Result<Self, CheckoutError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.api_token {
            let value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&value)
                .map_err(|e| CheckoutError::Config(format!("Invalid API token format: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.order_endpoint.clone(),
            user_id: config.user_id,
        })
    }

    /// Endpoint orders are sent to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl OrderApi for HttpOrderClient {
    #[instrument(skip(self, lines), fields(endpoint = %self.endpoint, lines = lines.len()))]
    async fn create_order(&self, lines: &[OrderLine]) -> Result<OrderConfirmation, CheckoutError> {
        let body = OrderRequest {
            user_id: self.user_id,
            products: lines,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CheckoutError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let confirmation: OrderConfirmation = response
            .json()
            .await
            .map_err(|e| CheckoutError::Parse(e.to_string()))?;

        debug!(order_id = %confirmation.id, "order created");
        Ok(confirmation)
    }
}
