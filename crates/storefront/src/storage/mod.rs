//! Storage abstraction for storefront data.
//!
//! # Collections
//!
//! - `users` - Registered users (hashed passwords only)
//! - `products` - Catalog, unique by slug
//! - `articles` - Editorial content, unique by slug
//! - `testimonials` - Customer reviews
//! - `faqs` - Questions and answers, listed by `order`
//! - `carts` - One cart per session id
//! - `orders` - Placed orders with a snapshot of their lines
//! - `newsletters` - Subscriptions, unique by email
//!
//! Handlers only see the [`Storage`] trait through `AppState`, so the backing
//! store can be swapped without touching routes. [`MemStorage`] is the
//! process-local implementation; its contents are lost on restart apart from
//! the seed data loaded by [`seed`].
//!
//! # Failure model
//!
//! Lookups of absent ids, slugs or sessions return `Ok(None)` (or `Ok(false)`
//! for deletes), never an error. Slugs, usernames and user emails are unique:
//! creating a record whose key is taken returns [`StorageError::Conflict`]
//! and stores nothing.

mod memory;
pub mod seed;

pub use memory::MemStorage;

use sleepwell_core::models::{
    Article, Cart, CartUpdate, Faq, NewArticle, NewCart, NewFaq, NewOrder, NewProduct,
    NewTestimonial, Newsletter, Order, Product, Testimonial, User,
};
use sleepwell_core::{
    ArticleCategory, ArticleId, CartId, Email, OrderId, OrderStatus, ProductCategory, ProductId,
    UserId,
};
use thiserror::Error;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store cannot serve requests (e.g. a writer panicked mid-update).
    #[error("storage unavailable: {0}")]
    Unavailable(&'static str),

    /// The write would break a uniqueness rule the store enforces.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A user ready to be stored: email normalised and password already hashed.
#[derive(Clone)]
pub struct UserDraft {
    pub username: String,
    pub email: Email,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

/// Storefront data store.
///
/// Operations are synchronous: implementations are expected to answer from
/// memory or a local cache without blocking on I/O. Every method fails with
/// [`StorageError::Unavailable`] when the store cannot serve requests.
#[allow(clippy::missing_errors_doc)]
pub trait Storage: Send + Sync {
    /// Verify the store can serve requests.
    fn health_check(&self) -> StorageResult<()>;

    // Users
    fn user(&self, id: UserId) -> StorageResult<Option<User>>;
    fn user_by_username(&self, username: &str) -> StorageResult<Option<User>>;
    fn user_by_email(&self, email: &Email) -> StorageResult<Option<User>>;
    /// Insert a user. [`StorageError::Conflict`] if the username or email is
    /// taken.
    fn create_user(&self, user: UserDraft) -> StorageResult<User>;

    // Products
    fn products(&self) -> StorageResult<Vec<Product>>;
    fn product(&self, id: ProductId) -> StorageResult<Option<Product>>;
    fn product_by_slug(&self, slug: &str) -> StorageResult<Option<Product>>;
    fn products_by_category(&self, category: ProductCategory) -> StorageResult<Vec<Product>>;
    fn featured_products(&self) -> StorageResult<Vec<Product>>;
    fn best_seller_products(&self) -> StorageResult<Vec<Product>>;
    /// Insert a product. [`StorageError::Conflict`] if the slug is taken.
    fn create_product(&self, product: NewProduct) -> StorageResult<Product>;

    // Articles
    fn articles(&self) -> StorageResult<Vec<Article>>;
    fn article(&self, id: ArticleId) -> StorageResult<Option<Article>>;
    fn article_by_slug(&self, slug: &str) -> StorageResult<Option<Article>>;
    fn articles_by_category(&self, category: ArticleCategory) -> StorageResult<Vec<Article>>;
    fn featured_articles(&self) -> StorageResult<Vec<Article>>;
    /// Insert an article. [`StorageError::Conflict`] if the slug is taken.
    fn create_article(&self, article: NewArticle) -> StorageResult<Article>;

    // Testimonials
    fn testimonials(&self) -> StorageResult<Vec<Testimonial>>;
    fn featured_testimonials(&self) -> StorageResult<Vec<Testimonial>>;
    fn create_testimonial(&self, testimonial: NewTestimonial) -> StorageResult<Testimonial>;

    // FAQs
    fn faqs(&self) -> StorageResult<Vec<Faq>>;
    fn create_faq(&self, faq: NewFaq) -> StorageResult<Faq>;

    // Carts
    fn cart(&self, id: CartId) -> StorageResult<Option<Cart>>;
    fn cart_by_session(&self, session_id: &str) -> StorageResult<Option<Cart>>;
    /// Create the cart for a session, or replace the contents of the cart the
    /// session already owns.
    fn create_cart(&self, cart: NewCart) -> StorageResult<Cart>;
    /// Merge the present fields of `update` into a cart. Always refreshes
    /// `updated_at`. Returns `None` if the cart does not exist, and
    /// [`StorageError::Conflict`] when moving it to a session that already
    /// owns another cart.
    fn update_cart(&self, id: CartId, update: CartUpdate) -> StorageResult<Option<Cart>>;
    fn delete_cart(&self, id: CartId) -> StorageResult<bool>;

    // Orders
    fn order(&self, id: OrderId) -> StorageResult<Option<Order>>;
    fn user_orders(&self, user_id: UserId) -> StorageResult<Vec<Order>>;
    fn create_order(&self, order: NewOrder) -> StorageResult<Order>;
    fn update_order_status(&self, id: OrderId, status: OrderStatus)
    -> StorageResult<Option<Order>>;

    // Newsletter
    /// Subscribe an email. Returns the existing record if already subscribed.
    fn subscribe(&self, email: &Email) -> StorageResult<Newsletter>;
    fn is_subscribed(&self, email: &Email) -> StorageResult<bool>;
}
