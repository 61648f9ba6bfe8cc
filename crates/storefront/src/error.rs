//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Every error body is JSON of the form `{"message": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body failed schema validation.
    #[error("{0}")]
    Validation(String),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(&'static str),

    /// Storage operation failed. `message` is the fixed text shown to clients.
    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: StorageError,
    },

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Storage { .. } | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Storage { message, .. } => (*message).to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Attach the client-facing message to a storage failure.
pub trait StorageContext<T> {
    /// Convert a storage error into [`AppError::Storage`] with `message`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if `self` is an error.
    fn context(self, message: &'static str) -> Result<T>;
}

impl<T> StorageContext<T> for std::result::Result<T, StorageError> {
    fn context(self, message: &'static str) -> Result<T> {
        self.map_err(|source| AppError::Storage { message, source })
    }
}

/// Add a breadcrumb for storefront actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Cart updated", Some(&[("cart_id", "12")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn body_message(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, value["message"].as_str().unwrap().to_string())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Product not found");
        assert_eq!(err.to_string(), "Product not found");

        let err = AppError::BadRequest("Username already exists".to_string());
        assert_eq!(err.to_string(), "Username already exists");
    }

    #[tokio::test]
    async fn test_app_error_status_codes() {
        assert_eq!(
            body_message(AppError::NotFound("Cart not found")).await,
            (StatusCode::NOT_FOUND, "Cart not found".to_string())
        );
        assert_eq!(
            body_message(AppError::Validation("Validation error: x".to_string())).await,
            (StatusCode::BAD_REQUEST, "Validation error: x".to_string())
        );
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let err = Err::<(), _>(StorageError::Unavailable("lock poisoned"))
            .context("Failed to fetch products")
            .unwrap_err();
        assert_eq!(
            body_message(err).await,
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch products".to_string()
            )
        );

        let (status, message) = body_message(AppError::Internal("hash failed".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("hash"));
    }
}
