//! Shopfront Core - Shared cart types.
//!
//! This crate provides the types used across all Shopfront components:
//! - `cart` - Cart store, persistence and checkout
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no storage access, no HTTP clients. This keeps the cart reducer trivially
//! testable and usable anywhere.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices, quantities, products and the cart reducer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
