//! Cart state coordinator.
//!
//! Holds the one cart of the current session, joined with the product
//! catalog. Every mutation goes to the API first and then refetches, so the
//! local view only ever reflects server state. Mutations report their
//! outcome through the [`Notifier`] and never return an error.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sleepwell_core::models::{Cart, CartItem, CartUpdate, NewCart, Product};
use sleepwell_core::{CartId, Cents, ProductId, UserId, pricing};
use tracing::instrument;

use crate::api::{ApiClient, StorefrontApi};
use crate::error::ClientError;
use crate::notify::{Notification, Notifier};

/// A cart line joined with its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Cents {
        self.product.unit_price().times(self.quantity)
    }
}

/// The session cart with product details filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedCart {
    pub id: CartId,
    pub user_id: Option<UserId>,
    pub session_id: String,
    pub lines: Vec<CartLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JoinedCart {
    /// Join `cart` with `products`, dropping lines whose product is gone.
    #[must_use]
    pub fn join(cart: Cart, products: &[Product]) -> Self {
        let by_id: HashMap<ProductId, &Product> = products.iter().map(|p| (p.id, p)).collect();

        let lines = cart
            .items
            .iter()
            .filter_map(|item| {
                let product = by_id.get(&item.product_id)?;
                Some(CartLine {
                    product: (*product).clone(),
                    quantity: item.quantity,
                })
            })
            .collect();

        Self {
            id: cart.id,
            user_id: cart.user_id,
            session_id: cart.session_id,
            lines,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }

    /// True for the placeholder of a session that has no stored cart.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        self.id.is_sentinel()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Cents {
        pricing::subtotal(
            self.lines
                .iter()
                .map(|line| (line.product.unit_price(), line.quantity)),
        )
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        pricing::item_count(self.lines.iter().map(|line| line.quantity))
    }

    /// The wire representation of the lines: product id and quantity only.
    #[must_use]
    pub fn wire_items(&self) -> Vec<CartItem> {
        self.lines
            .iter()
            .map(|line| CartItem::new(line.product_id(), line.quantity))
            .collect()
    }

    fn find(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }
}

/// Coordinates the session cart against the storefront API.
pub struct CartCoordinator<A = ApiClient> {
    api: A,
    session_id: String,
    notifier: Arc<dyn Notifier>,
    products: Vec<Product>,
    cart: Option<JoinedCart>,
}

impl<A: StorefrontApi> CartCoordinator<A> {
    /// Create a coordinator for `session_id`. Nothing is fetched until
    /// [`load`](Self::load) is called.
    pub fn new(api: A, session_id: impl Into<String>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            session_id: session_id.into(),
            notifier,
            products: Vec::new(),
            cart: None,
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The joined cart, once loaded.
    pub const fn cart(&self) -> Option<&JoinedCart> {
        self.cart.as_ref()
    }

    /// The product catalog, once loaded.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub(crate) fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    /// Fetch the catalog and the session cart, then join them.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails. The previous view is kept.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let products = self.api.products().await?;
        let cart = self.api.cart_by_session(&self.session_id).await?;

        let joined = JoinedCart::join(cart, &products);
        tracing::debug!(
            cart_id = %joined.id,
            lines = joined.lines.len(),
            "Cart loaded"
        );

        self.products = products;
        self.cart = Some(joined);
        Ok(())
    }

    /// Cart total with a zero fallback.
    pub fn total(&self) -> Cents {
        self.cart.as_ref().map_or(Cents::ZERO, JoinedCart::total)
    }

    /// Number of units in the cart with a zero fallback.
    pub fn item_count(&self) -> u64 {
        self.cart.as_ref().map_or(0, JoinedCart::item_count)
    }

    /// The stored cart, or `None` when absent or the placeholder.
    fn stored_cart(&self) -> Option<&JoinedCart> {
        self.cart.as_ref().filter(|cart| !cart.is_sentinel())
    }

    /// Add `quantity` units of a product.
    ///
    /// Creates the session cart when there is none, bumps the quantity of an
    /// existing line, or appends a new line.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn add_to_cart(&mut self, product_id: ProductId, quantity: u32) {
        if self.products.is_empty() {
            return;
        }

        let Some(product) = self.products.iter().find(|p| p.id == product_id) else {
            self.notify(Notification::error("Error", "Product not found."));
            return;
        };
        let name = product.name.clone();

        match self.try_add(product_id, quantity).await {
            Ok(()) => {
                self.notify(Notification::info(
                    "Added to cart",
                    format!("{name} added to your cart."),
                ));
            }
            Err(e) => {
                tracing::warn!(error = %e, %product_id, "Failed to add item to cart");
                self.notify(Notification::error(
                    "Error",
                    "Failed to add item to cart. Please try again.",
                ));
            }
        }
    }

    async fn try_add(&mut self, product_id: ProductId, quantity: u32) -> Result<(), ClientError> {
        if let Some(cart) = self.stored_cart() {
            let mut items = cart.wire_items();
            match items.iter_mut().find(|item| item.product_id == product_id) {
                Some(item) => item.quantity = item.quantity.saturating_add(quantity),
                None => items.push(CartItem::new(product_id, quantity)),
            }
            self.api
                .update_cart(cart.id, &CartUpdate::items(items))
                .await?;
        } else {
            let new_cart = NewCart {
                user_id: None,
                session_id: self.session_id.clone(),
                items: vec![CartItem::new(product_id, quantity)],
            };
            self.api.create_cart(&new_cart).await?;
        }

        self.load().await
    }

    /// Remove a product's line. No-op without a stored cart.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn remove_from_cart(&mut self, product_id: ProductId) {
        let Some(cart) = self.stored_cart() else {
            return;
        };
        let id = cart.id;
        let items: Vec<CartItem> = cart
            .wire_items()
            .into_iter()
            .filter(|item| item.product_id != product_id)
            .collect();

        match self.replace_items(id, items).await {
            Ok(()) => {
                self.notify(Notification::info(
                    "Removed from cart",
                    "Item removed from your cart.",
                ));
            }
            Err(e) => {
                tracing::warn!(error = %e, %product_id, "Failed to remove item from cart");
                self.notify(Notification::error(
                    "Error",
                    "Failed to remove item from cart. Please try again.",
                ));
            }
        }
    }

    /// Set the quantity of a product's line, clamped to at least 1.
    /// No-op without a stored cart.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn update_cart_item_quantity(&mut self, product_id: ProductId, quantity: i64) {
        let Some(cart) = self.stored_cart() else {
            return;
        };
        let id = cart.id;
        let quantity = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
        let items: Vec<CartItem> = cart
            .wire_items()
            .into_iter()
            .map(|item| {
                if item.product_id == product_id {
                    CartItem::new(product_id, quantity)
                } else {
                    item
                }
            })
            .collect();

        if let Err(e) = self.replace_items(id, items).await {
            tracing::warn!(error = %e, %product_id, "Failed to update cart quantity");
            self.notify(Notification::error(
                "Error",
                "Failed to update cart. Please try again.",
            ));
        }
    }

    async fn replace_items(&mut self, id: CartId, items: Vec<CartItem>) -> Result<(), ClientError> {
        self.api.update_cart(id, &CartUpdate::items(items)).await?;
        self.load().await
    }

    /// Delete the session cart and start a fresh empty one.
    /// No-op without a stored cart.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn clear_cart(&mut self) {
        let Some(cart) = self.stored_cart() else {
            return;
        };
        let id = cart.id;

        if let Err(e) = self.try_clear(id).await {
            tracing::warn!(error = %e, cart_id = %id, "Failed to clear cart");
            self.notify(Notification::error(
                "Error",
                "Failed to clear cart. Please try again.",
            ));
        }
    }

    async fn try_clear(&mut self, id: CartId) -> Result<(), ClientError> {
        self.api.delete_cart(id).await?;
        let empty = NewCart {
            user_id: None,
            session_id: self.session_id.clone(),
            items: Vec::new(),
        };
        self.api.create_cart(&empty).await?;
        self.load().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notify::{RecordingNotifier, Severity};
    use crate::testing::{FakeApi, SESSION, product};

    fn coordinator(api: FakeApi) -> (CartCoordinator<FakeApi>, RecordingNotifier) {
        let notifier = RecordingNotifier::new();
        let coordinator = CartCoordinator::new(api, SESSION, Arc::new(notifier.clone()));
        (coordinator, notifier)
    }

    #[test]
    fn test_join_drops_lines_with_missing_products() {
        let mut cart = Cart::sentinel(SESSION);
        cart.id = CartId::new(7);
        cart.items = vec![
            CartItem::new(ProductId::new(1), 2),
            CartItem::new(ProductId::new(99), 1),
            CartItem::new(ProductId::new(3), 1),
        ];
        let products = vec![
            product(1, "Formula Sonno", 3999, None),
            product(3, "Bundle Relax", 7499, Some(5999)),
        ];

        let joined = JoinedCart::join(cart, &products);
        assert_eq!(joined.lines.len(), 2);
        assert_eq!(joined.item_count(), 3);
        assert_eq!(joined.total(), Cents::new(3999 * 2 + 5999));
        assert_eq!(
            joined.wire_items(),
            vec![
                CartItem::new(ProductId::new(1), 2),
                CartItem::new(ProductId::new(3), 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_derived_values_fall_back_to_zero() {
        let (mut coordinator, _) = coordinator(FakeApi::with_catalog());
        assert_eq!(coordinator.total(), Cents::ZERO);
        assert_eq!(coordinator.item_count(), 0);

        coordinator.load().await.unwrap();
        assert!(coordinator.cart().unwrap().is_sentinel());
        assert_eq!(coordinator.total(), Cents::ZERO);
        assert_eq!(coordinator.item_count(), 0);
    }

    #[tokio::test]
    async fn test_first_add_creates_cart_then_updates() {
        let (mut coordinator, notifier) = coordinator(FakeApi::with_catalog());
        coordinator.load().await.unwrap();

        coordinator.add_to_cart(ProductId::new(1), 1).await;
        assert_eq!(coordinator.api().calls(), vec!["create_cart"]);
        assert_eq!(
            notifier.last().unwrap(),
            Notification::info("Added to cart", "Formula Sonno added to your cart.")
        );

        coordinator.add_to_cart(ProductId::new(1), 2).await;
        coordinator.add_to_cart(ProductId::new(3), 1).await;
        assert_eq!(
            coordinator.api().calls(),
            vec!["create_cart", "update_cart", "update_cart"]
        );

        let cart = coordinator.cart().unwrap();
        assert!(!cart.is_sentinel());
        assert_eq!(
            cart.wire_items(),
            vec![
                CartItem::new(ProductId::new(1), 3),
                CartItem::new(ProductId::new(3), 1),
            ]
        );
        assert_eq!(coordinator.item_count(), 4);
        assert_eq!(coordinator.total(), Cents::new(3999 * 3 + 5999));
    }

    #[tokio::test]
    async fn test_add_before_load_is_ignored() {
        let (mut coordinator, notifier) = coordinator(FakeApi::with_catalog());
        coordinator.add_to_cart(ProductId::new(1), 1).await;

        assert!(coordinator.api().calls().is_empty());
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_add_unknown_product_notifies() {
        let (mut coordinator, notifier) = coordinator(FakeApi::with_catalog());
        coordinator.load().await.unwrap();

        coordinator.add_to_cart(ProductId::new(42), 1).await;
        assert!(coordinator.api().calls().is_empty());
        assert_eq!(
            notifier.last().unwrap(),
            Notification::error("Error", "Product not found.")
        );
    }

    #[tokio::test]
    async fn test_failed_write_notifies_and_keeps_state() {
        let (mut coordinator, notifier) = coordinator(FakeApi::with_catalog());
        coordinator.load().await.unwrap();
        coordinator.add_to_cart(ProductId::new(1), 1).await;

        coordinator.api().fail_writes(true);
        coordinator.add_to_cart(ProductId::new(1), 1).await;

        let last = notifier.last().unwrap();
        assert_eq!(last.severity, Severity::Error);
        assert_eq!(last.description, "Failed to add item to cart. Please try again.");
        assert_eq!(coordinator.item_count(), 1);
    }

    #[tokio::test]
    async fn test_remove_and_quantity_clamp() {
        let (mut coordinator, notifier) = coordinator(FakeApi::with_catalog());
        coordinator.load().await.unwrap();
        coordinator.add_to_cart(ProductId::new(1), 2).await;
        coordinator.add_to_cart(ProductId::new(2), 1).await;

        coordinator.update_cart_item_quantity(ProductId::new(1), 0).await;
        assert_eq!(
            coordinator.cart().unwrap().wire_items().first(),
            Some(&CartItem::new(ProductId::new(1), 1))
        );

        coordinator.update_cart_item_quantity(ProductId::new(1), -5).await;
        assert_eq!(coordinator.item_count(), 2);

        coordinator.update_cart_item_quantity(ProductId::new(2), 4).await;
        assert_eq!(coordinator.item_count(), 5);

        coordinator.remove_from_cart(ProductId::new(1)).await;
        assert_eq!(
            coordinator.cart().unwrap().wire_items(),
            vec![CartItem::new(ProductId::new(2), 4)]
        );
        assert_eq!(
            notifier.last().unwrap(),
            Notification::info("Removed from cart", "Item removed from your cart.")
        );
    }

    #[tokio::test]
    async fn test_sentinel_cart_mutations_are_noops() {
        let (mut coordinator, notifier) = coordinator(FakeApi::with_catalog());
        coordinator.load().await.unwrap();

        coordinator.remove_from_cart(ProductId::new(1)).await;
        coordinator.update_cart_item_quantity(ProductId::new(1), 3).await;
        coordinator.clear_cart().await;

        assert!(coordinator.api().calls().is_empty());
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_clear_deletes_then_recreates_empty() {
        let (mut coordinator, _) = coordinator(FakeApi::with_catalog());
        coordinator.load().await.unwrap();
        coordinator.add_to_cart(ProductId::new(3), 2).await;
        let old_id = coordinator.cart().unwrap().id;

        coordinator.clear_cart().await;
        assert_eq!(
            coordinator.api().calls(),
            vec!["create_cart", "delete_cart", "create_cart"]
        );

        let cart = coordinator.cart().unwrap();
        assert!(cart.is_empty());
        assert!(!cart.is_sentinel());
        assert_ne!(cart.id, old_id);
        assert_eq!(coordinator.total(), Cents::ZERO);
    }
}
