//! Command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod newsletter;

use std::path::PathBuf;
use std::sync::Arc;

use sleepwell_client::{
    ApiClient, CartCoordinator, CheckoutError, ClientError, SessionError, SessionStore,
    TracingNotifier,
};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Checkout form file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    ReadForm {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Checkout form file is not valid YAML for the form.
    #[error("Invalid checkout form: {0}")]
    ParseForm(#[from] serde_yaml::Error),
}

/// Open the session cart and load it with the catalog.
pub async fn open_cart(
    api: ApiClient,
    session: &SessionStore,
) -> Result<CartCoordinator, CommandError> {
    let session_id = session.load_or_create()?;
    let mut cart = CartCoordinator::new(api, session_id, Arc::new(TracingNotifier));
    cart.load().await?;
    Ok(cart)
}
