//! Business logic services for storefront.
//!
//! # Services
//!
//! - `password` - Argon2id hashing for registered users

pub mod password;

pub use password::{PasswordError, hash_password};
