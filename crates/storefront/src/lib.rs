//! SleepWell Storefront library.
//!
//! This crate provides the storefront JSON API as a library, allowing it to
//! be tested in-process and served by the `sleepwell-storefront` binary.
//!
//! # Modules
//!
//! - [`storage`] - Storage abstraction, in-memory store and seed data
//! - [`routes`] - HTTP handlers for the `/api` surface
//! - [`middleware`] - Request ID, security headers, CORS and rate limiting
//! - [`services`] - Password hashing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

use axum::{Router, body::Body, http::Request};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

use crate::state::AppState;

/// Build the complete application router.
///
/// Layers, outermost first: Sentry, request tracing, request ID, CORS,
/// security headers. Write routes carry the rate limiter when enabled.
pub fn app(state: AppState) -> Router {
    let cors = middleware::cors_layer(&state.config().cors_origins);

    Router::new()
        .merge(routes::routes(state.config()))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(cors)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Span for one request. `request_id` is filled in by the request ID middleware.
fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}
