//! Newsletter subscription.

use sleepwell_client::ApiClient;

use super::CommandError;

pub async fn subscribe(api: &ApiClient, email: &str) -> Result<(), CommandError> {
    let outcome = api.subscribe(email).await?;
    tracing::info!("{}", outcome.message);
    Ok(())
}
