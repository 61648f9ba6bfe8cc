//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the store cannot serve requests.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.storage().health_check() {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::TestApp;

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = TestApp::seeded();
        assert_eq!(app.get("/health").await.0, StatusCode::OK);
        assert_eq!(app.get("/health/ready").await.0, StatusCode::OK);
    }
}
