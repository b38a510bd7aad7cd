//! File-backed persistence across store reloads.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use serde_json::Value;
use shopfront_cart::{CartStorage, CartStore, FileStorage};
use shopfront_core::ProductId;
use shopfront_integration_tests::product;

const KEY: &str = "cart";

#[test]
fn test_cart_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    let mut lamp = product(7, "Lamp", 4599).with_thumbnail("https://img/7.png");
    lamp.extra.insert("category".to_string(), Value::from("lighting"));

    let written = {
        let store = CartStore::load(Arc::new(FileStorage::open(dir.path()).unwrap()), KEY);
        store.add(&product(1, "Mug", 1200));
        store.add(&lamp);
        store.update_quantity(lamp.id, 3)
    };

    let reloaded = CartStore::load(Arc::new(FileStorage::open(dir.path()).unwrap()), KEY);
    let state = reloaded.snapshot();

    assert_eq!(state, written);
    let item = state.get(ProductId::new(7)).unwrap();
    assert_eq!(item.quantity.get(), 3);
    assert_eq!(item.thumbnail.as_deref(), Some("https://img/7.png"));
    assert_eq!(item.extra["category"], "lighting");
}

#[test]
fn test_corrupt_file_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cart.json"), "{\"id\": 1").unwrap();

    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
    let store = CartStore::load(storage.clone(), KEY);

    assert!(store.snapshot().is_empty());
    assert!(!dir.path().join("cart.json").exists());
    assert_eq!(storage.get(KEY).unwrap(), None);
}

#[test]
fn test_duplicate_items_are_treated_as_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("cart.json"),
        r#"[{"id":1,"title":"A","price":"1","quantity":1},{"id":1,"title":"A","price":"1","quantity":1}]"#,
    )
    .unwrap();

    let store = CartStore::load(Arc::new(FileStorage::open(dir.path()).unwrap()), KEY);

    assert!(store.snapshot().is_empty());
    assert!(!dir.path().join("cart.json").exists());
}

#[test]
fn test_persisted_file_is_a_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let store = CartStore::load(Arc::new(FileStorage::open(dir.path()).unwrap()), KEY);
    store.add(&product(1, "X", 1000));

    let raw = std::fs::read_to_string(dir.path().join("cart.json")).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    let items = value.as_array().unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items.first().unwrap()["id"], 1);
    assert_eq!(items.first().unwrap()["quantity"], 1);
}
