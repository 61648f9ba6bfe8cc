//! Session cart route handlers.
//!
//! ```text
//! GET    /api/carts/{session_id}  - Cart for a session (placeholder with id 0 if none)
//! POST   /api/carts               - Create the session's cart (replaces an existing one)
//! PUT    /api/carts/{id}          - Merge fields into a cart
//! DELETE /api/carts/{id}          - Delete a cart
//! ```
//!
//! The GET route is keyed by session id and the PUT/DELETE routes by cart id;
//! they share one path pattern.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sleepwell_core::CartId;
use sleepwell_core::models::{Cart, CartUpdate, NewCart};
use tracing::instrument;

use crate::error::{AppError, Result, StorageContext, add_breadcrumb};
use crate::extract::ValidatedJson;
use crate::state::AppState;
use crate::storage::StorageError;

/// Fetch the cart for a session.
///
/// Never 404s: a session without a stored cart gets [`Cart::sentinel`].
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Cart>> {
    let cart = state
        .storage()
        .cart_by_session(&session_id)
        .context("Failed to fetch cart")?
        .unwrap_or_else(|| Cart::sentinel(session_id));
    Ok(Json(cart))
}

#[instrument(skip(state, cart), fields(session_id = %cart.session_id))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(cart): ValidatedJson<NewCart>,
) -> Result<(StatusCode, Json<Cart>)> {
    let cart = state
        .storage()
        .create_cart(cart)
        .context("Failed to create cart")?;
    tracing::info!(cart_id = %cart.id, items = cart.items.len(), "Cart created");

    Ok((StatusCode::CREATED, Json(cart)))
}

/// Merge the present fields of the body into an existing cart.
#[instrument(skip(state, update))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CartId>,
    ValidatedJson(update): ValidatedJson<CartUpdate>,
) -> Result<Json<Cart>> {
    let cart = match state.storage().update_cart(id, update) {
        Ok(Some(cart)) => cart,
        Ok(None) => return Err(AppError::NotFound("Cart not found")),
        Err(StorageError::Conflict(message)) => return Err(AppError::BadRequest(message)),
        Err(source) => {
            return Err(AppError::Storage {
                message: "Failed to update cart",
                source,
            });
        }
    };

    let cart_id = cart.id.to_string();
    add_breadcrumb("cart", "Cart updated", Some(&[("cart_id", cart_id.as_str())]));
    tracing::info!(cart_id = %cart.id, items = cart.items.len(), "Cart updated");

    Ok(Json(cart))
}

#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<CartId>) -> Result<StatusCode> {
    if state
        .storage()
        .delete_cart(id)
        .context("Failed to delete cart")?
    {
        tracing::info!(cart_id = %id, "Cart deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Cart not found"))
    }
}
