//! Checkout from a YAML form.
//!
//! ```yaml
//! firstName: Giulia
//! lastName: Rossi
//! email: giulia@example.com
//! phone: "5551234567"
//! address1: 12 Via Roma
//! city: Portland
//! state: OR
//! postalCode: "97201"
//! country: US
//! sameAsBilling: true
//! cardName: Giulia Rossi
//! cardNumber: "4242424242424242"
//! expMonth: "09"
//! expYear: "2028"
//! cvv: "123"
//! ```

use std::path::Path;

use sleepwell_client::{CartCoordinator, CheckoutForm, checkout};

use super::CommandError;

/// Read and parse a checkout form file.
pub fn read_form(path: &Path) -> Result<CheckoutForm, CommandError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CommandError::ReadForm {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Submit the form for the session cart.
pub async fn place_order(cart: &mut CartCoordinator, form: &CheckoutForm) -> Result<(), CommandError> {
    let order = checkout::submit(cart, form).await?;
    tracing::info!("Order #{} placed, total {}", order.id, order.total);
    Ok(())
}
