//! Orders placed through checkout.
//!
//! An order holds a snapshot of the cart lines at submission time (name and
//! unit price included) and carries no reference to the cart it came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Cents, OrderId, OrderStatus, ProductId, UserId};

/// A line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    /// Unit price charged.
    pub price: Cents,
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Postal code is required"))]
    pub postal_code: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: Option<UserId>,
    pub status: OrderStatus,
    pub total: Cents,
    pub items: Vec<OrderItem>,
    pub shipping_address: Address,
    pub billing_address: Option<Address>,
    pub created_at: DateTime<Utc>,
}

/// Insert schema for an order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub status: OrderStatus,
    pub total: Cents,
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<OrderItem>,
    #[validate(nested)]
    pub shipping_address: Address,
    #[serde(default)]
    #[validate(nested)]
    pub billing_address: Option<Address>,
}

impl NewOrder {
    /// Build the stored record under an assigned id.
    #[must_use]
    pub fn into_record(self, id: OrderId, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            user_id: self.user_id,
            status: self.status,
            total: self.total,
            items: self.items,
            shipping_address: self.shipping_address,
            billing_address: self.billing_address,
            created_at,
        }
    }
}

/// Body of `PUT /api/orders/{id}/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn address() -> serde_json::Value {
        json!({
            "firstName": "Giulia", "lastName": "Verdi", "address1": "Via Roma 12",
            "city": "Milano", "state": "MI", "postalCode": "20121", "country": "IT"
        })
    }

    #[test]
    fn test_status_defaults_to_pending() {
        let order: NewOrder = serde_json::from_value(json!({
            "userId": null,
            "total": 5498,
            "items": [{"productId": 2, "quantity": 1, "price": 4999, "name": "Sonno Profondo Trim"}],
            "shippingAddress": address(),
            "billingAddress": null
        }))
        .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_empty_items_rejected() {
        let order: NewOrder = serde_json::from_value(json!({
            "total": 0,
            "items": [],
            "shippingAddress": address()
        }))
        .unwrap();
        assert!(order.validate().is_err());
    }

    #[test]
    fn test_nested_address_validated() {
        let mut shipping = address();
        shipping["city"] = json!("");
        let order: NewOrder = serde_json::from_value(json!({
            "total": 3999,
            "items": [{"productId": 1, "quantity": 1, "price": 3999, "name": "Formula Sonno Trim"}],
            "shippingAddress": shipping
        }))
        .unwrap();
        let errors = order.validate().unwrap_err();
        assert!(crate::validation::describe(&errors).contains("shippingAddress.city"));
    }
}
