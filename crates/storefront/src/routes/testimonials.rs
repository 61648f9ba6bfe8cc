//! Testimonial route handlers.
//!
//! ```text
//! GET  /api/testimonials           - All testimonials
//! GET  /api/testimonials/featured  - Featured testimonials
//! POST /api/testimonials           - Create a testimonial
//! ```

use axum::{Json, extract::State, http::StatusCode};
use sleepwell_core::models::{NewTestimonial, Testimonial};
use tracing::instrument;

use crate::error::{Result, StorageContext};
use crate::extract::ValidatedJson;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Testimonial>>> {
    let testimonials = state
        .storage()
        .testimonials()
        .context("Failed to fetch testimonials")?;
    Ok(Json(testimonials))
}

#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Testimonial>>> {
    let testimonials = state
        .storage()
        .featured_testimonials()
        .context("Failed to fetch featured testimonials")?;
    Ok(Json(testimonials))
}

#[instrument(skip(state, testimonial))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(testimonial): ValidatedJson<NewTestimonial>,
) -> Result<(StatusCode, Json<Testimonial>)> {
    let testimonial = state
        .storage()
        .create_testimonial(testimonial)
        .context("Failed to create testimonial")?;
    tracing::info!(testimonial_id = %testimonial.id, rating = testimonial.rating, "Testimonial created");

    Ok((StatusCode::CREATED, Json(testimonial)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::routes::test_support::TestApp;

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let app = TestApp::seeded();
        let (status, body) = app
            .send(
                Method::POST,
                "/api/testimonials",
                Some(json!({"customerName": "Luca B.", "rating": 5, "review": "Finally sleeping."})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 4);
        assert_eq!(body["verified"], true);
        assert_eq!(body["featured"], false);

        let (_, featured) = app.get("/api/testimonials/featured").await;
        assert_eq!(featured.as_array().unwrap().len(), 3);
        let (_, all) = app.get("/api/testimonials").await;
        assert_eq!(all.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_rating_out_of_range() {
        let (status, body) = TestApp::seeded()
            .send(
                Method::POST,
                "/api/testimonials",
                Some(json!({"customerName": "Luca B.", "rating": 6, "review": "Too good."})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("rating"));
    }
}
