//! CORS policy for browser front ends.

use axum::http::{HeaderName, HeaderValue, Method, header::CONTENT_TYPE};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::request_id::REQUEST_ID_HEADER;

/// Build the CORS layer from the configured origins.
///
/// With no origins configured the layer allows nothing, so only same-origin
/// callers can use the API from a browser. Origins that are not valid header
/// values are skipped with a warning.
#[must_use]
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        extract::Request,
        http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN},
        routing::get,
    };
    use tower::ServiceExt;

    async fn allow_origin(origins: &[String], origin: &str) -> Option<HeaderValue> {
        let app = Router::new()
            .route("/", get(|| async { "[]" }))
            .layer(cors_layer(origins));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).cloned()
    }

    #[tokio::test]
    async fn test_configured_origin_allowed() {
        let origins = vec!["http://localhost:5173".to_string()];
        assert_eq!(
            allow_origin(&origins, "http://localhost:5173").await.unwrap(),
            "http://localhost:5173"
        );
        assert!(allow_origin(&origins, "https://evil.example").await.is_none());
    }

    #[tokio::test]
    async fn test_no_origins_allows_none() {
        assert!(allow_origin(&[], "http://localhost:5173").await.is_none());
    }
}
