//! Cart totals and the shipping policy.
//!
//! Orders ship free once the merchandise subtotal reaches
//! [`FREE_SHIPPING_THRESHOLD`]; below it a [`FLAT_SHIPPING_FEE`] is added.
//! The threshold is inclusive.

use crate::Cents;

/// Subtotal at which shipping becomes free ($50.00).
pub const FREE_SHIPPING_THRESHOLD: Cents = Cents::new(5000);

/// Shipping fee charged below the threshold ($4.99).
pub const FLAT_SHIPPING_FEE: Cents = Cents::new(499);

/// Sum of `unit price × quantity` over the given lines. Zero for no lines.
pub fn subtotal<I>(lines: I) -> Cents
where
    I: IntoIterator<Item = (Cents, u32)>,
{
    lines
        .into_iter()
        .map(|(unit_price, quantity)| unit_price.times(quantity))
        .sum()
}

/// Total number of units across the given quantities. Zero for none.
pub fn item_count<I>(quantities: I) -> u64
where
    I: IntoIterator<Item = u32>,
{
    quantities.into_iter().map(u64::from).sum()
}

/// Shipping charged for a merchandise subtotal.
#[must_use]
pub fn shipping_fee(subtotal: Cents) -> Cents {
    if subtotal >= FREE_SHIPPING_THRESHOLD {
        Cents::ZERO
    } else {
        FLAT_SHIPPING_FEE
    }
}

/// Amount charged for an order: subtotal plus shipping.
#[must_use]
pub fn order_total(subtotal: Cents) -> Cents {
    subtotal + shipping_fee(subtotal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(order_total(Cents::new(4999)), Cents::new(5498));
        assert_eq!(order_total(Cents::new(5000)), Cents::new(5000));
        assert_eq!(order_total(Cents::new(7499)), Cents::new(7499));
    }

    #[test]
    fn test_empty_cart_still_pays_shipping_on_order() {
        assert_eq!(subtotal(std::iter::empty()), Cents::ZERO);
        assert_eq!(order_total(Cents::ZERO), FLAT_SHIPPING_FEE);
    }

    #[test]
    fn test_subtotal_multiplies_by_quantity() {
        let lines = [(Cents::new(3999), 2), (Cents::new(5999), 1)];
        assert_eq!(subtotal(lines), Cents::new(3999 * 2 + 5999));
    }

    #[test]
    fn test_item_count() {
        assert_eq!(item_count([2, 1, 4]), 7);
        assert_eq!(item_count(std::iter::empty()), 0);
    }
}
