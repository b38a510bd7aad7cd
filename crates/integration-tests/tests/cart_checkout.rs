//! End-to-end cart and checkout scenarios.
//!
//! These run the store against in-memory storage and a scripted order API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use shopfront_cart::interaction::{CHECKOUT_PROMPT, CLEAR_PROMPT};
use shopfront_cart::{CartStorage, CartStore, CheckoutOutcome, MemoryStorage, Notice};
use shopfront_core::{CartState, OrderId, ProductId, Quantity};
use shopfront_integration_tests::{MockOrderApi, RecordingInteraction, product};

const KEY: &str = "cart";

fn quantities(state: &CartState) -> Vec<(i64, u32)> {
    state
        .items()
        .iter()
        .map(|item| (item.id.as_i64(), item.quantity.get()))
        .collect()
}

fn persisted(storage: &MemoryStorage) -> CartState {
    let raw = storage.get(KEY).unwrap().expect("cart is persisted");
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_add_update_checkout_success() {
    let storage = Arc::new(MemoryStorage::new());
    let store = CartStore::load(storage.clone(), KEY);
    let x = product(1, "X", 1000);

    assert!(store.snapshot().is_empty());

    assert_eq!(quantities(&store.add(&x)), vec![(1, 1)]);
    assert_eq!(quantities(&store.add(&x)), vec![(1, 2)]);
    assert_eq!(quantities(&store.update_quantity(x.id, 5)), vec![(1, 5)]);
    assert_eq!(persisted(&storage), store.snapshot());

    let api = MockOrderApi::accepting(51);
    let ui = RecordingInteraction::accepting();

    let outcome = store.checkout(&api, &ui).await;

    assert_eq!(outcome, CheckoutOutcome::Placed(OrderId::new(51)));
    assert!(store.snapshot().is_empty());
    assert!(persisted(&storage).is_empty());

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests.first().unwrap().len(), 1);
    assert_eq!(requests.first().unwrap().first().unwrap().id, ProductId::new(1));
    assert_eq!(
        requests.first().unwrap().first().unwrap().quantity,
        Quantity::new(5).unwrap()
    );

    assert_eq!(ui.prompts(), vec![CHECKOUT_PROMPT.to_string()]);
    assert_eq!(
        ui.notices(),
        vec![Notice::OrderPlaced {
            order_id: OrderId::new(51)
        }]
    );
}

#[tokio::test]
async fn test_checkout_on_empty_cart() {
    let storage = Arc::new(MemoryStorage::new());
    let store = CartStore::load(storage.clone(), KEY);
    let api = MockOrderApi::accepting(1);
    let ui = RecordingInteraction::accepting();

    let outcome = store.checkout(&api, &ui).await;

    assert_eq!(outcome, CheckoutOutcome::EmptyCart);
    assert!(api.requests().is_empty());
    assert_eq!(ui.notices(), vec![Notice::EmptyCart]);
    assert!(store.snapshot().is_empty());
    assert_eq!(storage.get(KEY).unwrap(), None);
}

#[tokio::test]
async fn test_failed_checkout_keeps_cart_for_retry() {
    let storage = Arc::new(MemoryStorage::new());
    let store = CartStore::load(storage.clone(), KEY);
    store.add(&product(1, "A", 100));
    store.add(&product(2, "B", 200));
    let before = store.snapshot();

    let failing = MockOrderApi::rejecting(503, "Service Unavailable");
    let ui = RecordingInteraction::accepting();
    let outcome = store.checkout(&failing, &ui).await;

    assert!(matches!(outcome, CheckoutOutcome::Failed(_)));
    assert_eq!(failing.requests().len(), 1);
    assert_eq!(store.snapshot(), before);
    assert_eq!(persisted(&storage), before);
    assert!(matches!(
        ui.notices().as_slice(),
        [Notice::CheckoutFailed { message }] if message.contains("503")
    ));

    // A retry against a working API goes through with the same lines
    let working = MockOrderApi::accepting(7);
    let outcome = store.checkout(&working, &ui).await;
    assert_eq!(outcome, CheckoutOutcome::Placed(OrderId::new(7)));
    assert_eq!(working.requests(), failing.requests());
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn test_declined_checkout_sends_nothing() {
    let store = CartStore::load(Arc::new(MemoryStorage::new()), KEY);
    store.add(&product(1, "A", 100));
    let api = MockOrderApi::accepting(1);
    let ui = RecordingInteraction::declining();

    assert_eq!(store.checkout(&api, &ui).await, CheckoutOutcome::Cancelled);
    assert!(api.requests().is_empty());
    assert!(ui.notices().is_empty());
    assert_eq!(store.snapshot().len(), 1);
}

#[test]
fn test_order_is_insertion_order() {
    let store = CartStore::load(Arc::new(MemoryStorage::new()), KEY);
    let a = product(1, "A", 100);
    let b = product(2, "B", 200);

    store.add(&a);
    store.add(&b);
    store.remove(a.id);
    let state = store.add(&a);

    assert_eq!(quantities(&state), vec![(2, 1), (1, 1)]);
}

#[test]
fn test_clear_is_confirmation_gated() {
    let storage = Arc::new(MemoryStorage::new());
    let store = CartStore::load(storage.clone(), KEY);
    store.add(&product(1, "A", 100));

    let no = RecordingInteraction::declining();
    assert!(!store.clear(&no));
    assert_eq!(store.snapshot().len(), 1);
    assert_eq!(no.prompts(), vec![CLEAR_PROMPT.to_string()]);

    let yes = RecordingInteraction::accepting();
    assert!(store.clear(&yes));
    assert!(store.snapshot().is_empty());
    assert!(persisted(&storage).is_empty());
}

#[tokio::test]
async fn test_subscriber_observes_checkout_clear() {
    let store = CartStore::load(Arc::new(MemoryStorage::new()), KEY);
    store.add(&product(1, "A", 100));
    let mut rx = store.subscribe();

    let api = MockOrderApi::accepting(9);
    let ui = RecordingInteraction::accepting();
    store.checkout(&api, &ui).await;

    rx.changed().await.unwrap();
    assert!(rx.borrow().is_empty());
}
