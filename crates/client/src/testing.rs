//! In-memory `StorefrontApi` for unit tests.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use sleepwell_core::models::{Cart, CartUpdate, NewCart, NewOrder, Order, Product};
use sleepwell_core::{CartId, Cents, OrderId, ProductCategory, ProductId};

use crate::api::StorefrontApi;
use crate::error::ClientError;

pub const SESSION: &str = "k3j5h2g8f9d0s1a4z7x6c5v4b3";

pub fn product(id: i32, name: &str, price: u64, sale_price: Option<u64>) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: format!("{name} description"),
        short_description: None,
        price: Cents::new(price),
        sale_price: sale_price.map(Cents::new),
        category: ProductCategory::Supplements,
        image_url: format!("/images/{id}.jpg"),
        ingredients: None,
        benefits: Vec::new(),
        featured: false,
        best_seller: false,
        in_stock: true,
        quantity: 30,
        created_at: Utc::now(),
    }
}

#[derive(Default)]
struct FakeState {
    products: Vec<Product>,
    carts: Vec<Cart>,
    orders: Vec<NewOrder>,
    next_id: i32,
    fail_writes: bool,
    fail_orders: bool,
    calls: Vec<&'static str>,
}

impl FakeState {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn check_write(&mut self, call: &'static str) -> Result<(), ClientError> {
        if self.fail_writes {
            return Err(ClientError::Api {
                status: 500,
                message: "Internal server error".to_string(),
            });
        }
        self.calls.push(call);
        Ok(())
    }
}

/// Records every write it accepts; reads are not recorded.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with_catalog() -> Self {
        let api = Self::default();
        api.lock().products = vec![
            product(1, "Formula Sonno", 3999, None),
            product(2, "Sonno Profondo", 4999, None),
            product(3, "Bundle Relax", 7499, Some(5999)),
        ];
        api
    }

    #[allow(clippy::unwrap_used)]
    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    pub fn fail_orders(&self, fail: bool) {
        self.lock().fail_orders = fail;
    }

    pub fn orders(&self) -> Vec<NewOrder> {
        self.lock().orders.clone()
    }
}

fn not_found(what: &str) -> ClientError {
    ClientError::Api {
        status: 404,
        message: format!("{what} not found"),
    }
}

impl StorefrontApi for FakeApi {
    async fn products(&self) -> Result<Vec<Product>, ClientError> {
        Ok(self.lock().products.clone())
    }

    async fn cart_by_session(&self, session_id: &str) -> Result<Cart, ClientError> {
        Ok(self
            .lock()
            .carts
            .iter()
            .find(|cart| cart.session_id == session_id)
            .cloned()
            .unwrap_or_else(|| Cart::sentinel(session_id)))
    }

    async fn create_cart(&self, cart: &NewCart) -> Result<Cart, ClientError> {
        let mut state = self.lock();
        state.check_write("create_cart")?;
        let mut created = Cart::sentinel(cart.session_id.clone());
        created.id = CartId::new(state.next_id());
        created.items.clone_from(&cart.items);
        state.carts.retain(|c| c.session_id != cart.session_id);
        state.carts.push(created.clone());
        Ok(created)
    }

    async fn update_cart(&self, id: CartId, update: &CartUpdate) -> Result<Cart, ClientError> {
        let mut state = self.lock();
        state.check_write("update_cart")?;
        let cart = state
            .carts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Cart"))?;
        if let Some(items) = &update.items {
            cart.items.clone_from(items);
        }
        Ok(cart.clone())
    }

    async fn delete_cart(&self, id: CartId) -> Result<(), ClientError> {
        let mut state = self.lock();
        state.check_write("delete_cart")?;
        let before = state.carts.len();
        state.carts.retain(|c| c.id != id);
        if state.carts.len() == before {
            return Err(not_found("Cart"));
        }
        Ok(())
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order, ClientError> {
        let mut state = self.lock();
        if state.fail_orders {
            return Err(ClientError::Api {
                status: 400,
                message: "Validation error".to_string(),
            });
        }
        state.check_write("create_order")?;
        let id = OrderId::new(state.next_id());
        state.orders.push(order.clone());
        Ok(order.clone().into_record(id, Utc::now()))
    }
}
