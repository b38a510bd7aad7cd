//! Catalog browsing commands.

use std::fmt::Write as _;

use shopfront_cart::{CatalogClient, ShopfrontConfig};
use shopfront_core::{CartState, Product};

use super::cart::CartCommandError;
use super::open_store;

/// Print the first `limit` catalog products, marking those already in the cart.
pub async fn list(config: &ShopfrontConfig, limit: u32) -> Result<(), CartCommandError> {
    let store = open_store(config)?;
    let catalog = CatalogClient::new(&config.api)?;
    let products = catalog.list_products(limit).await?;

    #[allow(clippy::print_stdout)]
    {
        print!("{}", render_products(&products, &store.snapshot()));
    }
    Ok(())
}

/// Render a product listing, with the in-cart quantity after each product
/// that is in the cart.
pub fn render_products(products: &[Product], cart: &CartState) -> String {
    let mut out = String::new();
    for product in products {
        let in_cart = cart
            .get(product.id)
            .map(|item| format!("  [in cart: {}]", item.quantity.get()))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>6}  {:<40}  {:>10}{in_cart}",
            product.id.as_i64(),
            product.title,
            product.price.to_string(),
        );
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::{Price, ProductId};

    use super::*;

    #[test]
    fn test_render_marks_products_in_cart() {
        let mug = Product::new(ProductId::new(1), "Mug", Price::from_cents(1200));
        let tea = Product::new(ProductId::new(2), "Tea", Price::from_cents(450));

        let mut cart = CartState::new();
        cart.add(&tea);
        cart.update_quantity(tea.id, 3);

        let out = render_products(&[mug, tea], &cart);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(!lines.first().unwrap().contains("in cart"));
        assert!(lines.get(1).unwrap().ends_with("[in cart: 3]"));
    }

    #[test]
    fn test_render_empty_listing() {
        assert_eq!(render_products(&[], &CartState::new()), "");
    }
}
