//! Checkout: form validation and order submission.
//!
//! The form is validated locally before anything is sent. Card fields are
//! checked for shape only and never leave the client; the order payload
//! carries the item snapshot, the total and the addresses.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;
use serde::Deserialize;
use sleepwell_core::models::{Address, NewOrder, Order, OrderItem};
use sleepwell_core::validation::describe;
use sleepwell_core::{Email, OrderStatus, pricing};
use thiserror::Error;
use tracing::instrument;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::api::StorefrontApi;
use crate::cart::{CartCoordinator, JoinedCart};
use crate::error::ClientError;
use crate::notify::Notification;

/// How many years ahead an expiry year may be.
pub const EXPIRY_YEARS_AHEAD: i32 = 9;

static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,4}$").expect("Invalid regex"));
static EXP_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])$").expect("Invalid regex"));

/// Errors from [`submit`].
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("{}", describe(.0))]
    Invalid(ValidationErrors),

    #[error("Failed to place order: {0}")]
    Submit(#[source] ClientError),
}

fn default_country() -> String {
    "US".to_string()
}

const fn default_true() -> bool {
    true
}

/// Shipping, contact and payment details entered at checkout.
#[derive(Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    pub last_name: String,
    #[validate(custom(function = "contact_email"))]
    pub email: String,
    #[validate(length(min = 10, message = "Please enter a valid phone number"))]
    pub phone: String,

    #[validate(length(min = 5, message = "Address must be at least 5 characters"))]
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    #[validate(length(min = 2, message = "City must be at least 2 characters"))]
    pub city: String,
    #[validate(length(min = 2, message = "Please select a state"))]
    pub state: String,
    #[validate(length(min = 5, message = "Postal code must be at least 5 characters"))]
    pub postal_code: String,
    #[serde(default = "default_country")]
    #[validate(length(min = 2, message = "Please select a country"))]
    pub country: String,
    /// Bill to the shipping address.
    #[serde(default = "default_true")]
    pub same_as_billing: bool,

    #[validate(length(min = 2, message = "Name on card must be at least 2 characters"))]
    pub card_name: String,
    #[validate(length(min = 16, max = 19, message = "Please enter a valid card number"))]
    pub card_number: String,
    /// Two-digit month, `01` to `12`.
    #[validate(custom(function = "expiry_month"))]
    pub exp_month: String,
    /// Four-digit year.
    #[validate(custom(function = "expiry_year"))]
    pub exp_year: String,
    #[validate(custom(function = "card_cvv"))]
    pub cvv: String,
}

impl std::fmt::Debug for CheckoutForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("city", &self.city)
            .field("state", &self.state)
            .field("country", &self.country)
            .field("same_as_billing", &self.same_as_billing)
            .field("card_number", &"[REDACTED]")
            .field("cvv", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn contact_email(value: &str) -> Result<(), ValidationError> {
    Email::parse(value)
        .map(|_| ())
        .map_err(|_| invalid("email", "Please enter a valid email address"))
}

fn card_cvv(value: &str) -> Result<(), ValidationError> {
    if CVV_RE.is_match(value) {
        Ok(())
    } else {
        Err(invalid("cvv", "CVV must be 3 or 4 digits"))
    }
}

fn expiry_month(value: &str) -> Result<(), ValidationError> {
    if EXP_MONTH_RE.is_match(value) {
        Ok(())
    } else {
        Err(invalid("exp_month", "Please select an expiry month"))
    }
}

fn expiry_year(value: &str) -> Result<(), ValidationError> {
    let current = Utc::now().year();
    match value.parse::<i32>() {
        Ok(year) if (current..=current + EXPIRY_YEARS_AHEAD).contains(&year) => Ok(()),
        _ => Err(invalid("exp_year", "Please select an expiry year")),
    }
}

impl CheckoutForm {
    /// The shipping address entered on the form.
    #[must_use]
    pub fn shipping_address(&self) -> Address {
        Address {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            address1: self.address1.clone(),
            address2: self.address2.clone().filter(|line| !line.trim().is_empty()),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
        }
    }
}

/// Build the order payload for `cart`.
///
/// Each line is snapshotted with the product's current unit price and name.
/// The total includes shipping unless the cart total reaches the free
/// shipping threshold.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` for a cart without lines and
/// `CheckoutError::Invalid` when the form fails validation.
pub fn build_order(form: &CheckoutForm, cart: &JoinedCart) -> Result<NewOrder, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    form.validate().map_err(CheckoutError::Invalid)?;

    let items = cart
        .lines
        .iter()
        .map(|line| OrderItem {
            product_id: line.product_id(),
            quantity: line.quantity,
            price: line.product.unit_price(),
            name: line.product.name.clone(),
        })
        .collect();

    let shipping_address = form.shipping_address();
    let billing_address = if form.same_as_billing {
        None
    } else {
        Some(shipping_address.clone())
    };

    Ok(NewOrder {
        user_id: cart.user_id,
        status: OrderStatus::Pending,
        total: pricing::order_total(cart.total()),
        items,
        shipping_address,
        billing_address,
    })
}

/// Validate the form, place the order for the coordinator's cart and clear
/// the cart.
///
/// A failed submission notifies "Checkout Failed" and leaves the cart as it
/// was, so the same form can be submitted again.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` when there is nothing to order,
/// `CheckoutError::Invalid` for a form that fails validation, and
/// `CheckoutError::Submit` when the API rejects the order.
#[instrument(skip(coordinator, form), fields(session_id = %coordinator.session_id()))]
pub async fn submit<A: StorefrontApi>(
    coordinator: &mut CartCoordinator<A>,
    form: &CheckoutForm,
) -> Result<Order, CheckoutError> {
    let cart = coordinator.cart().ok_or(CheckoutError::EmptyCart)?;
    let new_order = build_order(form, cart)?;

    match coordinator.api().create_order(&new_order).await {
        Ok(order) => {
            tracing::info!(
                order_id = %order.id,
                total = %order.total,
                items = order.items.len(),
                "Order placed"
            );
            coordinator.clear_cart().await;
            coordinator.notify(Notification::info(
                "Order Placed!",
                "Your order has been successfully placed.",
            ));
            Ok(order)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Order submission failed");
            coordinator.notify(Notification::error(
                "Checkout Failed",
                "There was an error processing your order. Please try again.",
            ));
            Err(CheckoutError::Submit(e))
        }
    }
}
