//! Newsletter subscription route handlers.
//!
//! ```text
//! POST /api/newsletter/subscribe  - Subscribe an email (idempotent)
//! ```

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use sleepwell_core::Email;
use sleepwell_core::models::SubscribeRequest;
use tracing::instrument;

use crate::error::{AppError, Result, StorageContext};
use crate::state::AppState;

/// Subscribe an email to the newsletter.
///
/// Returns 201 for a new subscription and 200 when the (normalised) email is
/// already subscribed; either way exactly one record exists afterwards.
#[instrument(skip(state, payload))]
pub async fn subscribe(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubscribeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let Json(request) = payload?;

    let raw = request
        .email
        .filter(|email| !email.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Email is required".to_string()))?;
    let email =
        Email::parse(&raw).map_err(|_| AppError::BadRequest("Invalid email address".to_string()))?;

    let storage = state.storage();
    if storage
        .is_subscribed(&email)
        .context("Failed to subscribe to newsletter")?
    {
        return Ok((
            StatusCode::OK,
            Json(json!({ "message": "Email already subscribed" })),
        ));
    }

    let subscription = storage
        .subscribe(&email)
        .context("Failed to subscribe to newsletter")?;
    tracing::info!(newsletter_id = %subscription.id, domain = email.domain(), "Newsletter subscription created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Successfully subscribed to newsletter" })),
    ))
}
