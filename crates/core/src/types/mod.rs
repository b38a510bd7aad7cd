//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use cart::{CartAction, CartState, CartStateError, LineItem};
pub use id::*;
pub use price::Price;
pub use product::Product;
pub use quantity::{Quantity, QuantityError};
