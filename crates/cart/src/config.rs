//! Shopfront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOPFRONT_DATA_DIR` - Directory holding persisted cart data (default: .shopfront)
//! - `SHOPFRONT_CART_KEY` - Storage key for the cart (default: cart)
//! - `SHOPFRONT_ORDER_ENDPOINT` - Order creation endpoint (default: <https://dummyjson.com/carts/add>)
//! - `SHOPFRONT_CATALOG_URL` - Product catalog base URL (default: <https://dummyjson.com>)
//! - `SHOPFRONT_USER_ID` - Customer the orders are placed for (default: 1)
//! - `SHOPFRONT_API_TOKEN` - Bearer token sent to the commerce API
//! - `SHOPFRONT_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use shopfront_core::UserId;
use thiserror::Error;
use url::Url;

use crate::storage::is_file_safe_key;

const DEFAULT_ORDER_ENDPOINT: &str = "https://dummyjson.com/carts/add";
const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shopfront application configuration.
#[derive(Debug, Clone)]
pub struct ShopfrontConfig {
    /// Directory for file-backed cart storage
    pub data_dir: PathBuf,
    /// Storage key the cart is persisted under
    pub cart_key: String,
    /// Commerce API configuration
    pub api: CommerceApiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Commerce API (orders and catalog) configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct CommerceApiConfig {
    /// Endpoint orders are POSTed to on checkout
    pub order_endpoint: Url,
    /// Base URL of the product catalog
    pub catalog_url: Url,
    /// Fixed customer ID sent with every order
    pub user_id: UserId,
    /// Optional bearer token
    pub api_token: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for CommerceApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommerceApiConfig")
            .field("order_endpoint", &self.order_endpoint.as_str())
            .field("catalog_url", &self.catalog_url.as_str())
            .field("user_id", &self.user_id)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ShopfrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = PathBuf::from(get_or_default(&lookup, "SHOPFRONT_DATA_DIR", ".shopfront"));
        let cart_key = get_or_default(&lookup, "SHOPFRONT_CART_KEY", "cart");
        validate_storage_key(&cart_key, "SHOPFRONT_CART_KEY")?;

        let api = CommerceApiConfig::from_lookup(&lookup)?;
        let sentry_dsn = get_optional(&lookup, "SENTRY_DSN");

        Ok(Self {
            data_dir,
            cart_key,
            api,
            sentry_dsn,
        })
    }
}

impl CommerceApiConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let order_endpoint = parse_url(
            "SHOPFRONT_ORDER_ENDPOINT",
            &get_or_default(lookup, "SHOPFRONT_ORDER_ENDPOINT", DEFAULT_ORDER_ENDPOINT),
        )?;
        let catalog_url = parse_url(
            "SHOPFRONT_CATALOG_URL",
            &get_or_default(lookup, "SHOPFRONT_CATALOG_URL", DEFAULT_CATALOG_URL),
        )?;
        let user_id = get_or_default(lookup, "SHOPFRONT_USER_ID", "1")
            .parse::<UserId>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_USER_ID".to_string(), e.to_string())
            })?;
        let timeout_secs = get_or_default(
            lookup,
            "SHOPFRONT_HTTP_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPFRONT_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPFRONT_HTTP_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let api_token = get_optional(lookup, "SHOPFRONT_API_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from);

        Ok(Self {
            order_endpoint,
            catalog_url,
            user_id,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable.
fn get_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
}

/// Get a variable with a default value.
fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Parse an absolute http(s) URL.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{other}'"),
        )),
    }
}

fn validate_storage_key(key: &str, var_name: &str) -> Result<(), ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::MissingEnvVar(var_name.to_string()));
    }
    if !is_file_safe_key(key) {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "may only contain ASCII letters, digits, '-' and '_'".to_string(),
        ));
    }
    Ok(())
}
