//! Catalog listing.

use sleepwell_client::ApiClient;

use super::CommandError;

/// Log every product with its id and current price.
pub async fn list(api: &ApiClient) -> Result<(), CommandError> {
    let products = api.products().await?;
    if products.is_empty() {
        tracing::info!("The catalog is empty");
        return Ok(());
    }

    for product in &products {
        let price = match product.sale_price {
            Some(sale) => format!("{sale} (was {})", product.price),
            None => product.price.to_string(),
        };
        let stock = if product.in_stock { "" } else { " [out of stock]" };
        tracing::info!("#{:<3} {:<32} {price}{stock}", product.id.as_i32(), product.name);
    }
    Ok(())
}
