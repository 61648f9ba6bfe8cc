//! Entity records and their insert/update schemas.
//!
//! Each entity has a stored record (`Product`, `Cart`, ...) and an insert
//! schema (`NewProduct`, `NewCart`, ...) that derives [`validator::Validate`].
//! All wire shapes use camelCase keys. Defaults for optional flags are applied
//! at deserialization time, so a record built from a validated insert schema
//! is always complete.

pub mod article;
pub mod cart;
pub mod faq;
pub mod newsletter;
pub mod order;
pub mod product;
pub mod testimonial;
pub mod user;

pub use article::{Article, NewArticle};
pub use cart::{Cart, CartItem, CartUpdate, NewCart};
pub use faq::{Faq, NewFaq};
pub use newsletter::{Newsletter, SubscribeRequest};
pub use order::{Address, NewOrder, Order, OrderItem, OrderStatusUpdate};
pub use product::{NewProduct, Product};
pub use testimonial::{NewTestimonial, Testimonial};
pub use user::{NewUser, User, UserProfile};

/// Serde default helper for flags that default to `true`.
pub(crate) const fn default_true() -> bool {
    true
}
