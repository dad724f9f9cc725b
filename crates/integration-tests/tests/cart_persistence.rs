//! Snapshot persistence tests: restart survival and snapshot-format
//! compatibility with what the mobile client writes.

#![allow(clippy::unwrap_used)]

use go_marketplace_cart::BlobStore;
use go_marketplace_core::{LineItem, ProductId};
use go_marketplace_integration_tests::{TestCart, line_item};

#[tokio::test]
async fn test_missing_snapshot_starts_empty() {
    let fixture = TestCart::new();
    let provider = fixture.provider().await;

    assert!(provider.handle().items().await.unwrap().is_empty());
    // Loading alone writes nothing.
    assert_eq!(fixture.raw_snapshot().await, None);
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let fixture = TestCart::new();

    {
        let provider = fixture.provider().await;
        let cart = provider.handle();
        cart.add_to_cart(line_item("a", "Banana", 350, 1)).await.unwrap();
        cart.add_to_cart(line_item("b", "Mango", 450, 1)).await.unwrap();
        cart.increment(&ProductId::new("a")).await.unwrap();
    }

    // A fresh provider over the same storage sees the committed state.
    let provider = fixture.provider().await;
    let items = provider.handle().items().await.unwrap();

    assert_eq!(items.len(), 2);
    let banana = items.first().unwrap();
    assert_eq!(banana.title, "Banana");
    assert_eq!(banana.quantity, 2);
}

#[tokio::test]
async fn test_mobile_client_snapshot_is_readable() {
    let fixture = TestCart::new();

    // Snapshot exactly as the mobile client persisted it: plain JSON
    // records with numeric prices, in insertion (not title) order.
    let raw = r#"[
        {"id":"sku-2","title":"Mango","image_url":"https://cdn.gomarketplace.app/products/sku-2.png","price":4.5,"quantity":3},
        {"id":"sku-1","title":"Avocado","image_url":"https://cdn.gomarketplace.app/products/sku-1.png","price":3.2,"quantity":1}
    ]"#;
    fixture
        .storage
        .set(&fixture.config.storage_key, raw)
        .await
        .unwrap();

    let provider = fixture.provider().await;
    let items = provider.handle().items().await.unwrap();

    // Loaded sorted by title, values intact.
    assert_eq!(items.len(), 2);
    let avocado = items.first().unwrap();
    assert_eq!(avocado.id.as_str(), "sku-1");
    assert_eq!(avocado.quantity, 1);
    let mango = items.last().unwrap();
    assert_eq!(mango.title, "Mango");
    assert_eq!(mango.quantity, 3);
}

#[tokio::test]
async fn test_snapshot_keeps_mobile_client_record_shape() {
    let fixture = TestCart::new();
    let provider = fixture.provider().await;
    provider
        .handle()
        .add_to_cart(line_item("sku-1", "Banana", 350, 1))
        .await
        .unwrap();

    let raw = fixture.raw_snapshot().await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    let record = records.first().unwrap().as_object().unwrap();

    let mut fields: Vec<&str> = record.keys().map(String::as_str).collect();
    fields.sort_unstable();
    assert_eq!(fields, ["id", "image_url", "price", "quantity", "title"]);
    // Price is a JSON number, as the mobile client expects.
    assert!(record.get("price").unwrap().is_number());
}

#[tokio::test]
async fn test_malformed_snapshot_recovers_and_next_commit_repairs_it() {
    let fixture = TestCart::new();
    fixture
        .storage
        .set(&fixture.config.storage_key, "{definitely not a cart")
        .await
        .unwrap();

    let provider = fixture.provider().await;
    let cart = provider.handle();
    assert!(cart.items().await.unwrap().is_empty());

    // The first commit overwrites the corrupt snapshot with a valid one.
    cart.add_to_cart(line_item("a", "Banana", 350, 1)).await.unwrap();

    let repaired: Vec<LineItem> =
        serde_json::from_str(&fixture.raw_snapshot().await.unwrap()).unwrap();
    assert_eq!(repaired.len(), 1);
}
