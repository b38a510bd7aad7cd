//! Cart editing commands.
//!
//! # Usage
//!
//! ```bash
//! shopfront show
//! shopfront add 1
//! shopfront update 1 3
//! shopfront remove 1
//! shopfront clear
//! ```

use std::fmt::Write as _;

use shopfront_cart::{CatalogClient, CatalogError, Interaction, ShopfrontConfig, StorageError};
use shopfront_core::{CartState, ProductId};
use thiserror::Error;

use super::open_store;

/// Errors that can occur while editing the cart.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// The cart storage could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The product could not be fetched from the catalog.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Print the cart.
pub fn show(config: &ShopfrontConfig) -> Result<(), CartCommandError> {
    let store = open_store(config)?;
    print_cart(&store.snapshot());
    Ok(())
}

/// Look up a product in the catalog and add one unit of it.
pub async fn add(config: &ShopfrontConfig, id: ProductId) -> Result<(), CartCommandError> {
    let store = open_store(config)?;
    let catalog = CatalogClient::new(&config.api)?;

    let product = catalog.get_product(id).await?;
    tracing::info!("Adding {} ({})", product.title, product.id);

    print_cart(&store.add(&product));
    Ok(())
}

/// Remove a product from the cart.
pub fn remove(config: &ShopfrontConfig, id: ProductId) -> Result<(), CartCommandError> {
    let store = open_store(config)?;
    if store.snapshot().get(id).is_none() {
        tracing::warn!("Product {id} is not in the cart");
    }
    print_cart(&store.remove(id));
    Ok(())
}

/// Set the quantity of a product in the cart.
pub fn update(
    config: &ShopfrontConfig,
    id: ProductId,
    quantity: i64,
) -> Result<(), CartCommandError> {
    let store = open_store(config)?;
    if quantity < 1 {
        tracing::warn!("Ignoring quantity {quantity}; it must be at least 1");
    }
    print_cart(&store.update_quantity(id, quantity));
    Ok(())
}

/// Empty the cart after confirmation.
pub fn clear(config: &ShopfrontConfig, ui: &dyn Interaction) -> Result<(), CartCommandError> {
    let store = open_store(config)?;
    if !store.clear(ui) {
        tracing::info!("Cart left unchanged");
    }
    Ok(())
}

fn print_cart(state: &CartState) {
    #[allow(clippy::print_stdout)]
    {
        print!("{}", render_cart(state));
    }
}

/// Render the cart as a plain-text table.
pub fn render_cart(state: &CartState) -> String {
    if state.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let mut out = String::new();
    for item in state.items() {
        let _ = writeln!(
            out,
            "{:>6}  {:<40}  {:>4} x {:>10}  {:>10}",
            item.id.as_i64(),
            item.title,
            item.quantity.get(),
            item.price.to_string(),
            item.line_price().to_string(),
        );
    }
    let _ = writeln!(
        out,
        "{} item(s), subtotal {}",
        state.total_quantity(),
        state.subtotal()
    );
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::{Price, Product};

    use super::*;

    #[test]
    fn test_render_empty_cart() {
        assert_eq!(render_cart(&CartState::new()), "Your cart is empty\n");
    }

    #[test]
    fn test_render_cart_lines_and_totals() {
        let mut cart = CartState::new();
        cart.add(&Product::new(ProductId::new(1), "Mug", Price::from_cents(1200)));
        cart.add(&Product::new(ProductId::new(2), "Tea", Price::from_cents(450)));
        cart.update_quantity(ProductId::new(2), 2);

        let out = render_cart(&cart);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines.first().unwrap().contains("Mug"));
        assert!(lines.get(1).unwrap().contains("$9.00"));
        assert_eq!(*lines.last().unwrap(), "3 item(s), subtotal $21.00");
    }
}
