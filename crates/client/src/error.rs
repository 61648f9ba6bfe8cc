//! Client error type.

use thiserror::Error;

/// Errors from talking to the storefront API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The configured base URL cannot be used.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
