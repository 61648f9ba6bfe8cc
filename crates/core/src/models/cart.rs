//! Session carts.
//!
//! A cart belongs to one anonymous session id. Its wire representation only
//! carries `{productId, quantity}` pairs; product details are joined in by
//! the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{CartId, ProductId, UserId};

/// A cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
}

impl CartItem {
    /// Create a cart line.
    #[must_use]
    pub const fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// A stored cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub user_id: Option<UserId>,
    pub session_id: String,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// The placeholder returned for a session with no stored cart.
    ///
    /// It has id 0, no items and fresh timestamps, and is never stored.
    #[must_use]
    pub fn sentinel(session_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CartId::SENTINEL,
            user_id: None,
            session_id: session_id.into(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if this cart was never stored.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        self.id.is_sentinel()
    }
}

/// Insert schema for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCart {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[validate(length(min = 1, message = "Session id is required"))]
    pub session_id: String,
    #[validate(nested)]
    pub items: Vec<CartItem>,
}

/// Partial cart update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Session id cannot be empty"))]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub items: Option<Vec<CartItem>>,
}

impl CartUpdate {
    /// An update that only replaces the items list.
    #[must_use]
    pub const fn items(items: Vec<CartItem>) -> Self {
        Self {
            user_id: None,
            session_id: None,
            items: Some(items),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sentinel_shape() {
        let cart = Cart::sentinel("abc123");
        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(value["id"], 0);
        assert_eq!(value["sessionId"], "abc123");
        assert_eq!(value["items"], json!([]));
        assert!(cart.is_sentinel());
        assert_eq!(cart.created_at, cart.updated_at);
    }

    #[test]
    fn test_zero_quantity_fails_validation() {
        let cart: NewCart = serde_json::from_value(json!({
            "sessionId": "abc123",
            "items": [{"productId": 1, "quantity": 0}]
        }))
        .unwrap();
        assert!(cart.validate().is_err());
    }

    #[test]
    fn test_update_items_only_serializes_items() {
        let update = CartUpdate::items(vec![CartItem::new(ProductId::new(2), 3)]);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"items": [{"productId": 2, "quantity": 3}]})
        );
    }

    #[test]
    fn test_update_validates_nested_items() {
        let update: CartUpdate =
            serde_json::from_value(json!({"items": [{"productId": 2, "quantity": 0}]})).unwrap();
        assert!(update.validate().is_err());
        assert!(CartUpdate::default().validate().is_ok());
    }
}
