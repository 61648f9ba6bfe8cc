//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (store reachable)
//!
//! # Catalog
//! GET  /api/products                    - All products
//! GET  /api/products/featured           - Featured products
//! GET  /api/products/bestsellers        - Best sellers
//! GET  /api/products/category/{category}
//! GET  /api/products/{slug}
//! POST /api/products
//! GET  /api/articles                    - All articles
//! GET  /api/articles/featured
//! GET  /api/articles/category/{category}
//! GET  /api/articles/{slug}
//! POST /api/articles
//! GET  /api/testimonials
//! GET  /api/testimonials/featured
//! POST /api/testimonials
//! GET  /api/faqs
//! POST /api/faqs
//!
//! # Users
//! POST /api/users/register
//! GET  /api/users/{user_id}/orders
//!
//! # Cart
//! GET    /api/carts/{session_id}        - Cart for a session
//! POST   /api/carts
//! PUT    /api/carts/{id}
//! DELETE /api/carts/{id}
//!
//! # Orders
//! POST /api/orders
//! GET  /api/orders/{id}
//! PUT  /api/orders/{id}/status
//!
//! # Newsletter
//! POST /api/newsletter/subscribe
//! ```
//!
//! Write routes are rate limited per client IP when enabled in configuration.

pub mod articles;
pub mod carts;
pub mod faqs;
pub mod health;
pub mod newsletter;
pub mod orders;
pub mod products;
pub mod testimonials;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::config::StorefrontConfig;
use crate::middleware::write_rate_limiter;
use crate::state::AppState;

/// Create the read-only routes.
pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        // Products
        .route("/api/products", get(products::index))
        .route("/api/products/featured", get(products::featured))
        .route("/api/products/bestsellers", get(products::best_sellers))
        .route("/api/products/category/{category}", get(products::by_category))
        .route("/api/products/{slug}", get(products::show))
        // Articles
        .route("/api/articles", get(articles::index))
        .route("/api/articles/featured", get(articles::featured))
        .route("/api/articles/category/{category}", get(articles::by_category))
        .route("/api/articles/{slug}", get(articles::show))
        // Testimonials and FAQs
        .route("/api/testimonials", get(testimonials::index))
        .route("/api/testimonials/featured", get(testimonials::featured))
        .route("/api/faqs", get(faqs::index))
        // Users, carts, orders
        .route("/api/users/{user_id}/orders", get(users::orders))
        .route("/api/carts/{id}", get(carts::show))
        .route("/api/orders/{id}", get(orders::show))
}

/// Create the routes that change state.
pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", post(products::create))
        .route("/api/articles", post(articles::create))
        .route("/api/testimonials", post(testimonials::create))
        .route("/api/faqs", post(faqs::create))
        .route("/api/users/register", post(users::register))
        .route("/api/carts", post(carts::create))
        .route("/api/carts/{id}", put(carts::update).delete(carts::delete))
        .route("/api/orders", post(orders::create))
        .route("/api/orders/{id}/status", put(orders::update_status))
        .route("/api/newsletter/subscribe", post(newsletter::subscribe))
}

/// Create all routes for the storefront.
pub fn routes(config: &StorefrontConfig) -> Router<AppState> {
    let writes = if config.rate_limit {
        write_routes().layer(write_rate_limiter())
    } else {
        write_routes()
    };

    read_routes().merge(writes)
}
