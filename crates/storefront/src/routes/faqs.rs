//! FAQ route handlers.
//!
//! ```text
//! GET  /api/faqs  - All FAQs, by display order
//! POST /api/faqs  - Create a FAQ
//! ```

use axum::{Json, extract::State, http::StatusCode};
use sleepwell_core::models::{Faq, NewFaq};
use tracing::instrument;

use crate::error::{Result, StorageContext};
use crate::extract::ValidatedJson;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Faq>>> {
    let faqs = state.storage().faqs().context("Failed to fetch FAQs")?;
    Ok(Json(faqs))
}

#[instrument(skip(state, faq))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(faq): ValidatedJson<NewFaq>,
) -> Result<(StatusCode, Json<Faq>)> {
    let faq = state
        .storage()
        .create_faq(faq)
        .context("Failed to create FAQ")?;
    tracing::info!(faq_id = %faq.id, order = faq.order, "FAQ created");

    Ok((StatusCode::CREATED, Json(faq)))
}
