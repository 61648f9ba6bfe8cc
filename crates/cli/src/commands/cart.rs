//! Cart display.

use sleepwell_client::CartCoordinator;
use sleepwell_core::pricing;

/// Log the cart lines, the subtotal, shipping and what an order would cost.
pub fn show(cart: &CartCoordinator) {
    let lines = cart.cart().map(|c| c.lines.as_slice()).unwrap_or_default();
    if lines.is_empty() {
        tracing::info!("Your cart is empty");
        return;
    }

    for line in lines {
        tracing::info!(
            "#{:<3} {:<32} {} x {} = {}",
            line.product_id().as_i32(),
            line.product.name,
            line.quantity,
            line.product.unit_price(),
            line.line_total()
        );
    }

    let subtotal = cart.total();
    let shipping = pricing::shipping_fee(subtotal);
    tracing::info!("Items: {}", cart.item_count());
    tracing::info!("Subtotal: {subtotal}");
    if shipping.as_u64() == 0 {
        tracing::info!("Shipping: free");
    } else {
        tracing::info!(
            "Shipping: {shipping} (free from {})",
            pricing::FREE_SHIPPING_THRESHOLD
        );
    }
    tracing::info!("Total: {}", pricing::order_total(subtotal));
}
