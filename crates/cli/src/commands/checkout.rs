//! Checkout command.

use shopfront_cart::{
    CheckoutError, CheckoutOutcome, HttpOrderClient, Interaction, ShopfrontConfig, StorageError,
};
use thiserror::Error;

use super::open_store;

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutCommandError {
    /// The cart storage could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The order client could not be built.
    #[error("Client error: {0}")]
    Client(#[from] CheckoutError),

    /// The order was rejected; the cart was kept.
    #[error("Order was not placed: {0}")]
    NotPlaced(String),
}

/// Submit the cart as an order.
///
/// A failed order is reported to the user and also returned as an error so
/// the process exits non-zero. An empty or declined checkout is not an error.
pub async fn run(config: &ShopfrontConfig, ui: &dyn Interaction) -> Result<(), CheckoutCommandError> {
    let store = open_store(config)?;
    let client = HttpOrderClient::new(&config.api)?;
    tracing::debug!("Submitting order to {}", client.endpoint());

    match store.checkout(&client, ui).await {
        CheckoutOutcome::Placed(order_id) => {
            tracing::info!("Order {order_id} placed");
            Ok(())
        }
        CheckoutOutcome::EmptyCart | CheckoutOutcome::Cancelled => Ok(()),
        CheckoutOutcome::Failed(message) => Err(CheckoutCommandError::NotPlaced(message)),
    }
}
