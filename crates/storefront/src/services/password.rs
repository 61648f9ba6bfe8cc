//! Password hashing.
//!
//! Passwords are hashed with Argon2id (default parameters) and a random salt.
//! Hashing is CPU-bound, so it runs on the blocking thread pool instead of an
//! async worker.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors that can occur while hashing a password.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Argon2 rejected the input or parameters.
    #[error("password hashing error")]
    Hash,

    /// The hashing task panicked or was cancelled.
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Hash a password with Argon2id on the blocking pool.
///
/// # Errors
///
/// Returns `PasswordError` if hashing fails or the task is cancelled.
pub async fn hash_password(password: SecretString) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_blocking(password.expose_secret())).await?
}

fn hash_blocking(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::Hash)
}
