//! Cart state and its transitions.
//!
//! [`CartState`] is the ordered list of [`LineItem`]s. The transitions here
//! are pure: they mutate the state in place and report whether anything
//! changed, leaving persistence and notification to the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Price, Product, ProductId, Quantity};

/// Errors that can occur when building a [`CartState`] from raw items.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartStateError {
    /// Two line items share a product ID.
    #[error("duplicate line item for product {0}")]
    DuplicateItem(ProductId),
}

/// Keys owned by [`LineItem`] itself that the passthrough payload must not repeat.
const RESERVED_KEYS: [&str; 5] = ["id", "title", "price", "thumbnail", "quantity"];

/// One product entry in the cart with an aggregated quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog identifier, unique within a cart.
    pub id: ProductId,
    /// Title copied from the product at add-time.
    pub title: String,
    /// Unit price copied from the product at add-time.
    pub price: Price,
    /// Thumbnail copied from the product at add-time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Remaining catalog fields, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Units of this product in the cart.
    pub quantity: Quantity,
}

impl LineItem {
    /// Build a line item with a quantity of one from a product record.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let mut extra = product.extra.clone();
        for key in RESERVED_KEYS {
            extra.remove(key);
        }

        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            thumbnail: product.thumbnail.clone(),
            extra,
            quantity: Quantity::ONE,
        }
    }

    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// A single cart state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of a product.
    Add(Product),
    /// Remove a product's line item.
    Remove(ProductId),
    /// Set a product's quantity. Values below 1 are ignored.
    UpdateQuantity {
        /// Product to update.
        id: ProductId,
        /// Requested quantity, as entered by the user.
        quantity: i64,
    },
    /// Remove every line item.
    Clear,
}

/// The full ordered collection of line items at a point in time.
///
/// ## Invariants
///
/// - At most one [`LineItem`] per [`ProductId`]
/// - Every quantity is at least 1 (enforced by [`Quantity`])
/// - Items keep their insertion order
///
/// ## Examples
///
/// ```
/// use shopfront_core::{CartState, Price, Product, ProductId};
///
/// let mug = Product::new(ProductId::new(1), "Mug", Price::from_cents(1200));
///
/// let mut cart = CartState::new();
/// cart.add(&mug);
/// cart.add(&mug);
///
/// assert_eq!(cart.len(), 1);
/// assert_eq!(cart.total_quantity(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up the line item for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities (the count shown on a cart badge).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of all line prices.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(LineItem::line_price).sum()
    }

    /// Apply a transition, returning `true` if the state changed.
    pub fn apply(&mut self, action: CartAction) -> bool {
        match action {
            CartAction::Add(product) => self.add(&product),
            CartAction::Remove(id) => self.remove(id),
            CartAction::UpdateQuantity { id, quantity } => self.update_quantity(id, quantity),
            CartAction::Clear => self.clear(),
        }
    }

    /// Add one unit of `product`.
    ///
    /// An existing line item has its quantity incremented and keeps its
    /// position and payload. Otherwise a new item is appended.
    pub fn add(&mut self, product: &Product) -> bool {
        match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(item) => {
                let next = item.quantity.increment();
                let changed = next != item.quantity;
                item.quantity = next;
                changed
            }
            None => {
                self.items.push(LineItem::from_product(product));
                true
            }
        }
    }

    /// Remove the line item for `id`, if present.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Set the quantity for `id`.
    ///
    /// Quantities below 1 and unknown IDs leave the state unchanged.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> bool {
        let Ok(quantity) = Quantity::try_from(quantity) else {
            return false;
        };

        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove every line item.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        true
    }
}

impl TryFrom<Vec<LineItem>> for CartState {
    type Error = CartStateError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        for (index, item) in items.iter().enumerate() {
            if items.iter().skip(index + 1).any(|other| other.id == item.id) {
                return Err(CartStateError::DuplicateItem(item.id));
            }
        }
        Ok(Self { items })
    }
}

impl From<CartState> for Vec<LineItem> {
    fn from(state: CartState) -> Self {
        state.items
    }
}
