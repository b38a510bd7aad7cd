//! Shopfront Cart - cart store, persistence and checkout.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the cart state and is the only writer
//! - Every change is written through to a [`storage::CartStorage`] backend
//!   and published to subscribers over a `tokio::sync::watch` channel
//! - Checkout submits the cart through an [`checkout::OrderApi`]; the
//!   default implementation posts JSON with `reqwest`
//! - Prompts and notices go through [`interaction::Interaction`], so the
//!   store has no knowledge of terminals or browsers
//!
//! # Modules
//!
//! - `catalog` - Product catalog client (cached with `moka`)
//! - `checkout` - Order API trait and HTTP client
//! - `config` - Environment configuration
//! - `interaction` - Confirmation prompts and user notices
//! - `storage` - File and in-memory key/value storage
//! - `store` - The cart store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod interaction;
pub mod storage;
pub mod store;

pub use catalog::{CatalogClient, CatalogError};
pub use checkout::{CheckoutError, HttpOrderClient, OrderApi, OrderConfirmation, OrderLine};
pub use config::{CommerceApiConfig, ConfigError, ShopfrontConfig};
pub use interaction::{Interaction, Notice};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CartStore, CheckoutOutcome};
