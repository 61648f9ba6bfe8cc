//! User route handlers.
//!
//! ```text
//! POST /api/users/register         - Register a user
//! GET  /api/users/{user_id}/orders - Orders placed by a user
//! ```
//!
//! There is no login: registration only records the account.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use secrecy::SecretString;
use sleepwell_core::models::{NewUser, Order, UserProfile};
use sleepwell_core::{Email, UserId};
use tracing::instrument;

use crate::error::{AppError, Result, StorageContext};
use crate::extract::ValidatedJson;
use crate::services::hash_password;
use crate::state::AppState;
use crate::storage::{StorageError, UserDraft};

/// Register a user.
///
/// Username and email must both be unused. The response never contains the
/// password or its hash.
#[instrument(skip(state, user), fields(username = %user.username))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(user): ValidatedJson<NewUser>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    let storage = state.storage();
    let email = Email::parse(&user.email).map_err(|e| AppError::Validation(e.to_string()))?;

    if storage
        .user_by_username(&user.username)
        .context("Failed to register user")?
        .is_some()
    {
        return Err(AppError::BadRequest("Username already exists".to_string()));
    }

    if storage
        .user_by_email(&email)
        .context("Failed to register user")?
        .is_some()
    {
        return Err(AppError::BadRequest("Email already exists".to_string()));
    }

    let password_hash = hash_password(SecretString::from(user.password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let created = match storage.create_user(UserDraft {
        username: user.username,
        email,
        password_hash,
        first_name: user.first_name,
        last_name: user.last_name,
        phone_number: user.phone_number,
    }) {
        Ok(created) => created,
        Err(StorageError::Conflict(message)) => return Err(AppError::BadRequest(message)),
        Err(source) => {
            return Err(AppError::Storage {
                message: "Failed to register user",
                source,
            });
        }
    };
    tracing::info!(user_id = %created.id, "User registered");

    Ok((StatusCode::CREATED, Json(UserProfile::from(&created))))
}

/// List the orders placed by a user. Unknown users have no orders.
#[instrument(skip(state))]
pub async fn orders(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<Order>>> {
    let orders = state
        .storage()
        .user_orders(user_id)
        .context("Failed to fetch user orders")?;
    Ok(Json(orders))
}
