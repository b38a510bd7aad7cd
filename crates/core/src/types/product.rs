//! Catalog product records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Price, ProductId};

/// A product record as supplied by the catalog.
///
/// Only `id` has meaning to the cart. The remaining fields are display
/// payload; anything beyond `title`, `price` and `thumbnail` is kept in
/// [`Product::extra`] and carried through to the cart untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Thumbnail image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Any other catalog fields (description, category, rating, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Create a product with no extra fields.
    #[must_use]
    pub fn new(id: ProductId, title: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            thumbnail: None,
            extra: Map::new(),
        }
    }

    /// Set the thumbnail URL.
    #[must_use]
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_record_keeps_extra_fields() {
        let json = r#"{
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "price": 9.99,
            "thumbnail": "https://cdn.dummyjson.com/products/1/thumbnail.png",
            "category": "beauty",
            "rating": 4.94
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Price::from_cents(999));
        assert_eq!(product.extra["category"], "beauty");
        assert!(product.extra.contains_key("rating"));
        assert!(!product.extra.contains_key("title"));
    }

    #[test]
    fn test_thumbnail_is_optional() {
        let product: Product =
            serde_json::from_str(r#"{"id": 1, "title": "X", "price": 10}"#).unwrap();
        assert_eq!(product.thumbnail, None);
        assert!(product.extra.is_empty());
    }
}
