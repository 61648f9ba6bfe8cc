//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span, status and latency)
//! 3. Request ID (add unique ID to each request, record it on the span)
//! 4. CORS (configured origins only)
//! 5. Security headers (nosniff, frame deny, CSP, no-store)
//! 6. Rate limiting on write routes (governor)

pub mod cors;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use cors::cors_layer;
pub use rate_limit::write_rate_limiter;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
