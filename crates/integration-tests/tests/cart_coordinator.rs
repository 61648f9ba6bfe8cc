//! Cart coordinator against the live API.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use reqwest::Method;
use serde_json::json;
use sleepwell_client::{CartCoordinator, Notification, RecordingNotifier, Severity};
use sleepwell_core::models::CartItem;
use sleepwell_core::{Cents, ProductId};
use sleepwell_integration_tests::TestServer;

fn coordinator(server: &TestServer, session: &str) -> (CartCoordinator, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let cart = CartCoordinator::new(server.api(), session, Arc::new(notifier.clone()));
    (cart, notifier)
}

#[tokio::test]
async fn test_add_update_remove_round_trip() {
    let server = TestServer::spawn().await;
    let (mut cart, notifier) = coordinator(&server, "integration-session");
    cart.load().await.unwrap();
    assert!(cart.cart().unwrap().is_sentinel());
    assert_eq!(cart.products().len(), 3);

    cart.add_to_cart(ProductId::new(1), 1).await;
    assert_eq!(
        notifier.last().unwrap(),
        Notification::info("Added to cart", "Formula Sonno Trim added to your cart.")
    );
    cart.add_to_cart(ProductId::new(1), 1).await;
    cart.add_to_cart(ProductId::new(3), 1).await;

    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total(), Cents::new(3999 * 2 + 5999));

    // The server holds only product ids and quantities.
    let (_, stored) = server.get("/api/carts/integration-session").await;
    assert_eq!(
        stored["items"],
        json!([{"productId": 1, "quantity": 2}, {"productId": 3, "quantity": 1}])
    );

    cart.update_cart_item_quantity(ProductId::new(3), 0).await;
    cart.update_cart_item_quantity(ProductId::new(1), 5).await;
    assert_eq!(cart.item_count(), 6);

    cart.remove_from_cart(ProductId::new(1)).await;
    assert_eq!(
        cart.cart().unwrap().wire_items(),
        vec![CartItem::new(ProductId::new(3), 1)]
    );
    assert!(
        notifier
            .notifications()
            .iter()
            .all(|n| n.severity == Severity::Info)
    );
}

#[tokio::test]
async fn test_clear_leaves_an_empty_stored_cart() {
    let server = TestServer::spawn().await;
    let (mut cart, _) = coordinator(&server, "clear-me");
    cart.load().await.unwrap();
    cart.add_to_cart(ProductId::new(2), 2).await;
    let before = cart.cart().unwrap().id;

    cart.clear_cart().await;

    let after = cart.cart().unwrap();
    assert!(after.is_empty());
    assert!(!after.is_sentinel());
    assert_ne!(after.id, before);
    assert_eq!(cart.total(), Cents::ZERO);

    let (_, stored) = server.get("/api/carts/clear-me").await;
    assert_eq!(stored["id"].as_i64().unwrap(), i64::from(after.id.as_i32()));
    assert_eq!(stored["items"], json!([]));
}

#[tokio::test]
async fn test_lines_for_unknown_products_are_dropped() {
    let server = TestServer::spawn().await;
    let (status, _) = server
        .send(
            Method::POST,
            "/api/carts",
            &json!({
                "sessionId": "stale-session",
                "items": [{"productId": 2, "quantity": 1}, {"productId": 404, "quantity": 3}]
            }),
        )
        .await;
    assert_eq!(status, 201);

    let (mut cart, _) = coordinator(&server, "stale-session");
    cart.load().await.unwrap();
    assert_eq!(cart.item_count(), 1);
    assert_eq!(cart.total(), Cents::new(4999));

    // The next write sends only the lines that survived the join.
    cart.add_to_cart(ProductId::new(2), 1).await;
    let (_, stored) = server.get("/api/carts/stale-session").await;
    assert_eq!(stored["items"], json!([{"productId": 2, "quantity": 2}]));
}

#[tokio::test]
async fn test_failures_surface_as_notifications() {
    let server = TestServer::spawn().await;
    let (mut cart, notifier) = coordinator(&server, "doomed-session");
    cart.load().await.unwrap();
    cart.add_to_cart(ProductId::new(1), 1).await;
    let id = cart.cart().unwrap().id;

    // Delete the cart behind the coordinator's back.
    let response = server
        .http
        .delete(server.url(&format!("/api/carts/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    cart.add_to_cart(ProductId::new(1), 1).await;
    assert_eq!(
        notifier.last().unwrap(),
        Notification::error("Error", "Failed to add item to cart. Please try again.")
    );

    cart.add_to_cart(ProductId::new(99), 1).await;
    assert_eq!(
        notifier.last().unwrap(),
        Notification::error("Error", "Product not found.")
    );
}
