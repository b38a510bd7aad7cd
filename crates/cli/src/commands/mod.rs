//! Command implementations.

pub mod cart;
pub mod checkout;
pub mod products;

use std::sync::Arc;

use shopfront_cart::{CartStore, FileStorage, ShopfrontConfig, StorageError};

/// Open the cart persisted under the configured data directory.
///
/// # Errors
///
/// Returns `StorageError` if the data directory cannot be created.
pub fn open_store(config: &ShopfrontConfig) -> Result<CartStore, StorageError> {
    let storage = FileStorage::open(&config.data_dir)?;
    Ok(CartStore::load(Arc::new(storage), &config.cart_key))
}
