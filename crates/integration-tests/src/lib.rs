//! Integration test support for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! No external services are needed. Order requests go either to
//! [`MockOrderApi`] or to a [`CannedServer`] bound on a loopback port.
//!
//! # Test Categories
//!
//! - `cart_checkout` - End-to-end cart and checkout scenarios
//! - `catalog_client` - Catalog lookups, caching and listings
//! - `http_order_client` - The HTTP order client against a loopback axum server
//! - `persistence` - File-backed persistence across store reloads

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use shopfront_cart::{
    CheckoutError, Interaction, Notice, OrderApi, OrderConfirmation, OrderLine, ShopfrontConfig,
};
use shopfront_core::{OrderId, Price, Product, ProductId};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A catalog-style product for tests.
#[must_use]
pub fn product(id: i64, title: &str, cents: i64) -> Product {
    Product::new(ProductId::new(id), title, Price::from_cents(cents))
}

/// Configuration with every default, plus the given overrides.
#[must_use]
pub fn config_with(vars: &[(&str, String)]) -> ShopfrontConfig {
    ShopfrontConfig::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test configuration is valid")
}

// =============================================================================
// RecordingInteraction
// =============================================================================

/// An [`Interaction`] that answers every prompt the same way and records
/// what it was asked and told.
#[derive(Debug, Default)]
pub struct RecordingInteraction {
    answer: bool,
    prompts: Mutex<Vec<String>>,
    notices: Mutex<Vec<Notice>>,
}

impl RecordingInteraction {
    /// Answer every prompt with yes.
    #[must_use]
    pub fn accepting() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    /// Answer every prompt with no.
    #[must_use]
    pub fn declining() -> Self {
        Self::default()
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Notices shown so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Interaction for RecordingInteraction {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

// =============================================================================
// MockOrderApi
// =============================================================================

#[derive(Debug)]
enum MockResponse {
    Accept(OrderId),
    Reject { status: u16, message: String },
}

/// An [`OrderApi`] with a scripted response that records every request.
#[derive(Debug)]
pub struct MockOrderApi {
    response: MockResponse,
    requests: Mutex<Vec<Vec<OrderLine>>>,
}

impl MockOrderApi {
    /// Accept every order with `order_id`.
    #[must_use]
    pub fn accepting(order_id: i64) -> Self {
        Self {
            response: MockResponse::Accept(OrderId::new(order_id)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Reject every order with an API error.
    #[must_use]
    pub fn rejecting(status: u16, message: &str) -> Self {
        Self {
            response: MockResponse::Reject {
                status,
                message: message.to_string(),
            },
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<Vec<OrderLine>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderApi for MockOrderApi {
    async fn create_order(&self, lines: &[OrderLine]) -> Result<OrderConfirmation, CheckoutError> {
        self.requests.lock().unwrap().push(lines.to_vec());
        match &self.response {
            MockResponse::Accept(id) => Ok(OrderConfirmation {
                id: *id,
                total: None,
                total_quantity: None,
            }),
            MockResponse::Reject { status, message } => Err(CheckoutError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

// =============================================================================
// CannedServer
// =============================================================================

/// An HTTP request as received by [`CannedServer`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Request method.
    pub method: Method,
    /// Request target (path and query).
    pub uri: Uri,
    /// Request headers.
    pub headers: HeaderMap,
    /// Raw body.
    pub body: String,
}

impl CapturedRequest {
    /// Value of the first header named `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body parsed as JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Canned { status: StatusCode, body: String },
    Silent,
}

#[derive(Clone)]
struct CannedState {
    reply: Reply,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// A loopback HTTP server that answers every request with one canned
/// response and records what it received.
pub struct CannedServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: JoinHandle<()>,
}

impl CannedServer {
    /// Start a server answering with `status` and a JSON `body`.
    pub async fn start(status: u16, body: &str) -> Self {
        Self::serve(Reply::Canned {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        })
        .await
    }

    /// Start a server that accepts requests and never answers them.
    pub async fn silent() -> Self {
        Self::serve(Reply::Silent).await
    }

    async fn serve(reply: Reply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .fallback(record_and_reply)
            .with_state(CannedState {
                reply,
                requests: Arc::clone(&requests),
            });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    /// URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for CannedServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record_and_reply(
    State(state): State<CannedState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    // Record before answering so callers see it once they have a response
    state.requests.lock().unwrap().push(CapturedRequest {
        method,
        uri,
        headers,
        body,
    });

    match state.reply {
        Reply::Canned { status, body } => {
            (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
        }
        Reply::Silent => std::future::pending().await,
    }
}
