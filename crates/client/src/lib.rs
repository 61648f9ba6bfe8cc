//! SleepWell Client - the storefront's client-side logic.
//!
//! Everything a front end needs on top of the JSON API:
//!
//! - [`api`] - Typed HTTP client with an in-memory catalog cache
//! - [`session`] - Persisted anonymous session identifier
//! - [`cart`] - Cart state coordinator joining cart lines with products
//! - [`checkout`] - Checkout form validation and order submission
//! - [`notify`] - Sink for user-facing notifications
//!
//! Cart mutations never return errors to the caller. Their outcome is
//! reported through the [`Notifier`] handed to the coordinator.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod error;
pub mod notify;
pub mod session;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, StorefrontApi, SubscribeOutcome};
pub use cart::{CartCoordinator, CartLine, JoinedCart};
pub use checkout::{CheckoutError, CheckoutForm};
pub use error::ClientError;
pub use notify::{Notification, Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use session::{SessionError, SessionStore};
