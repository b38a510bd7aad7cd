//! The cart store: owned cart state with write-through persistence.
//!
//! [`CartStore`] holds the current [`CartState`] in a `tokio::sync::watch`
//! channel. Every operation that changes the state writes the new snapshot to
//! storage and publishes it to subscribers; operations that change nothing do
//! neither.
//!
//! # Example
//!
//! ```rust,ignore
//! let storage = Arc::new(FileStorage::open(&config.data_dir)?);
//! let store = CartStore::load(storage, &config.cart_key);
//!
//! store.add(&product);
//! store.update_quantity(product.id, 3);
//!
//! let outcome = store.checkout(&order_client, &terminal).await;
//! ```

use std::sync::Arc;

use shopfront_core::{CartAction, CartState, OrderId, Product, ProductId};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

use crate::checkout::{OrderApi, OrderLine};
use crate::interaction::{CHECKOUT_PROMPT, CLEAR_PROMPT, Interaction, Notice};
use crate::storage::CartStorage;

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Nothing to order; no request was made.
    EmptyCart,
    /// The user declined the confirmation; no request was made.
    Cancelled,
    /// The order was created and the cart emptied.
    Placed(OrderId),
    /// The request failed; the cart is unchanged.
    Failed(String),
}

/// Owned cart state shared by every view of the cart.
///
/// Clones share the same state and storage.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    state: watch::Sender<CartState>,
    storage: Arc<dyn CartStorage>,
    key: String,
}

impl CartStore {
    /// Load the cart persisted under `key`.
    ///
    /// A missing key yields an empty cart. A value that is not a valid cart
    /// (bad JSON, not an array, invalid items, duplicate IDs) is removed from
    /// storage and also yields an empty cart. Read failures are logged and
    /// treated as a missing key.
    #[instrument(skip(storage))]
    pub fn load(storage: Arc<dyn CartStorage>, key: &str) -> Self {
        let state = read_persisted(storage.as_ref(), key);
        debug!(items = state.len(), "cart loaded");

        let (state, _) = watch::channel(state);
        Self {
            inner: Arc::new(CartStoreInner {
                state,
                storage,
                key: key.to_string(),
            }),
        }
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.inner.state.borrow().clone()
    }

    /// Observe every committed change to the cart.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.inner.state.subscribe()
    }

    /// Add one unit of `product`.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&self, product: &Product) -> CartState {
        self.dispatch(CartAction::Add(product.clone()))
    }

    /// Remove the line item for `id`, if present.
    #[instrument(skip(self))]
    pub fn remove(&self, id: ProductId) -> CartState {
        self.dispatch(CartAction::Remove(id))
    }

    /// Set the quantity for `id`. Values below 1 are ignored.
    #[instrument(skip(self))]
    pub fn update_quantity(&self, id: ProductId, quantity: i64) -> CartState {
        self.dispatch(CartAction::UpdateQuantity { id, quantity })
    }

    /// Empty the cart after the user confirms.
    ///
    /// Returns `true` if the user confirmed. Confirming on an already empty
    /// cart counts as confirmed.
    #[instrument(skip(self, interaction))]
    pub fn clear(&self, interaction: &dyn Interaction) -> bool {
        if !interaction.confirm(CLEAR_PROMPT) {
            debug!("clear declined");
            return false;
        }
        self.dispatch(CartAction::Clear);
        interaction.notify(&Notice::Cleared);
        true
    }

    /// Submit the cart as an order.
    ///
    /// An empty cart is rejected before any prompt or request. On success
    /// the cart is emptied without a second confirmation; on failure it is
    /// left untouched. Either way the user is notified.
    #[instrument(skip_all)]
    pub async fn checkout(
        &self,
        api: &dyn OrderApi,
        interaction: &dyn Interaction,
    ) -> CheckoutOutcome {
        let lines: Vec<OrderLine> = self
            .inner
            .state
            .borrow()
            .items()
            .iter()
            .map(OrderLine::from)
            .collect();

        if lines.is_empty() {
            interaction.notify(&Notice::EmptyCart);
            return CheckoutOutcome::EmptyCart;
        }

        if !interaction.confirm(CHECKOUT_PROMPT) {
            debug!("checkout declined");
            return CheckoutOutcome::Cancelled;
        }

        match api.create_order(&lines).await {
            Ok(confirmation) => {
                info!(order_id = %confirmation.id, lines = lines.len(), "order placed");
                self.dispatch(CartAction::Clear);
                interaction.notify(&Notice::OrderPlaced {
                    order_id: confirmation.id,
                });
                CheckoutOutcome::Placed(confirmation.id)
            }
            Err(e) => {
                warn!("checkout failed: {e}");
                let message = e.to_string();
                interaction.notify(&Notice::CheckoutFailed {
                    message: message.clone(),
                });
                CheckoutOutcome::Failed(message)
            }
        }
    }

    /// Apply a transition; persist and publish only if it changed the state.
    fn dispatch(&self, action: CartAction) -> CartState {
        let changed = self.inner.state.send_if_modified(|state| state.apply(action));
        let snapshot = self.snapshot();
        if changed {
            self.persist(&snapshot);
        }
        snapshot
    }

    /// Write the snapshot through to storage.
    ///
    /// Failures are logged; the in-memory state stays authoritative.
    fn persist(&self, state: &CartState) {
        let json = match serde_json::to_string(state) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize cart: {e}");
                return;
            }
        };
        if let Err(e) = self.inner.storage.set(&self.inner.key, &json) {
            error!("Failed to persist cart: {e}");
        }
    }
}

/// Read and validate the persisted cart, discarding corrupt values.
fn read_persisted(storage: &dyn CartStorage, key: &str) -> CartState {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return CartState::new(),
        Err(e) => {
            warn!("Failed to read persisted cart: {e}");
            return CartState::new();
        }
    };

    match serde_json::from_str::<CartState>(&raw) {
        Ok(state) => state,
        Err(e) => {
            warn!("Discarding corrupt persisted cart: {e}");
            if let Err(e) = storage.remove(key) {
                error!("Failed to remove corrupt cart: {e}");
            }
            CartState::new()
        }
    }
}
