//! User-facing prompts and notifications.
//!
//! The cart never talks to a terminal or a browser directly. Confirmations
//! and notices go through [`Interaction`], which each front end implements.

use std::fmt;

use shopfront_core::OrderId;

/// A message shown to the user after a cart operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Checkout was attempted with nothing in the cart.
    EmptyCart,
    /// The order was accepted by the commerce API.
    OrderPlaced {
        /// Identifier returned by the API.
        order_id: OrderId,
    },
    /// The order request failed; the cart was left as it was.
    CheckoutFailed {
        /// Human-readable failure reason.
        message: String,
    },
    /// The cart was emptied at the user's request.
    Cleared,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCart => write!(f, "Your cart is empty"),
            Self::OrderPlaced { order_id } => write!(f, "Order placed! Order ID: {order_id}"),
            Self::CheckoutFailed { message } => write!(f, "Checkout failed: {message}"),
            Self::Cleared => write!(f, "Cart emptied"),
        }
    }
}

/// Prompts and notifications for cart operations that need the user.
pub trait Interaction: Send + Sync {
    /// Ask a yes/no question. Returns `true` only on an affirmative answer.
    fn confirm(&self, message: &str) -> bool;

    /// Show a notice.
    fn notify(&self, notice: &Notice);
}

/// Confirmation prompt used before emptying the cart.
pub const CLEAR_PROMPT: &str = "Empty the cart?";

/// Confirmation prompt used before placing an order.
pub const CHECKOUT_PROMPT: &str = "Place the order?";
