//! Order route handlers.
//!
//! ```text
//! POST /api/orders              - Place an order
//! GET  /api/orders/{id}         - Single order
//! PUT  /api/orders/{id}/status  - Change an order's status
//! ```
//!
//! Placing an order does not touch the cart it came from; the client clears
//! the cart afterwards.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use sleepwell_core::OrderId;
use sleepwell_core::models::{NewOrder, Order, OrderStatusUpdate};
use tracing::instrument;

use crate::error::{AppError, Result, StorageContext, add_breadcrumb};
use crate::extract::ValidatedJson;
use crate::state::AppState;

#[instrument(skip(state, order), fields(items = order.items.len(), total = %order.total))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(order): ValidatedJson<NewOrder>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = state
        .storage()
        .create_order(order)
        .context("Failed to create order")?;

    let order_id = order.id.to_string();
    add_breadcrumb("order", "Order placed", Some(&[("order_id", order_id.as_str())]));
    tracing::info!(order_id = %order.id, total = %order.total, "Order placed");

    Ok((StatusCode::CREATED, Json(order)))
}

#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<OrderId>) -> Result<Json<Order>> {
    state
        .storage()
        .order(id)
        .context("Failed to fetch order")?
        .map(Json)
        .ok_or(AppError::NotFound("Order not found"))
}

#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    payload: std::result::Result<Json<OrderStatusUpdate>, JsonRejection>,
) -> Result<Json<Order>> {
    let Json(OrderStatusUpdate { status }) = payload?;

    let order = state
        .storage()
        .update_order_status(id, status)
        .context("Failed to update order status")?
        .ok_or(AppError::NotFound("Order not found"))?;
    tracing::info!(order_id = %order.id, status = %order.status, "Order status updated");

    Ok(Json(order))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::{Value, json};

    use crate::routes::test_support::TestApp;

    fn order_body() -> Value {
        let address = json!({
            "firstName": "Giulia", "lastName": "Verdi", "address1": "Via Roma 12",
            "city": "Milano", "state": "MI", "postalCode": "20121", "country": "IT"
        });
        json!({
            "userId": 7,
            "total": 5498,
            "items": [{"productId": 2, "quantity": 1, "price": 4999, "name": "Sonno Profondo"}],
            "shippingAddress": address,
            "billingAddress": null
        })
    }

    #[tokio::test]
    async fn test_place_and_fetch_order() {
        let app = TestApp::seeded();
        let (status, created) = app.send(Method::POST, "/api/orders", Some(order_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "pending");
        assert_eq!(created["total"], 5498);

        let (status, fetched) = app.get("/api/orders/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (_, orders) = app.get("/api/users/7/orders").await;
        assert_eq!(orders.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_order_needs_items() {
        let mut body = order_body();
        body["items"] = json!([]);
        let (status, body) = TestApp::seeded().send(Method::POST, "/api/orders", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("\"items\""));
    }

    #[tokio::test]
    async fn test_status_update() {
        let app = TestApp::seeded();
        app.send(Method::POST, "/api/orders", Some(order_body())).await;

        let (status, body) = app
            .send(Method::PUT, "/api/orders/1/status", Some(json!({"status": "shipped"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "shipped");

        let (status, _) = app
            .send(Method::PUT, "/api/orders/1/status", Some(json!({"status": "lost"})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app
            .send(Method::PUT, "/api/orders/9/status", Some(json!({"status": "cancelled"})))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Order not found");
    }

    #[tokio::test]
    async fn test_missing_order() {
        let (status, body) = TestApp::seeded().get("/api/orders/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Order not found");
    }
}
