//! Order history for the current session.

use serde::{Deserialize, Serialize};

use nepfit_core::OrderId;

use crate::models::Order;

/// Append-only list of placed orders, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Record a placed order. Insertion order is the only ordering.
    pub fn add_order(&mut self, order: Order) {
        self.orders.push(order);
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    use nepfit_core::PaymentMethod;

    use super::*;
    use crate::models::{OrderTotals, ShippingDetails};

    fn order(placed_offset_secs: i64) -> Order {
        Order {
            id: OrderId::generate(),
            payment_method: PaymentMethod::PayPal,
            card: None,
            items: Vec::new(),
            shipping: ShippingDetails::default(),
            totals: OrderTotals {
                subtotal: Decimal::ZERO,
                discount_code: None,
                discount_amount: Decimal::ZERO,
                final_amount: Decimal::ZERO,
            },
            placed_at: Utc::now() + Duration::seconds(placed_offset_secs),
        }
    }

    #[test]
    fn test_preserves_insertion_order_not_timestamps() {
        let mut history = OrderHistory::new();
        let later = order(60);
        let earlier = order(-60);

        history.add_order(later.clone());
        history.add_order(earlier.clone());

        assert_eq!(history.orders(), [later, earlier]);
    }

    #[test]
    fn test_get_by_id() {
        let mut history = OrderHistory::new();
        let placed = order(0);
        history.add_order(placed.clone());

        assert_eq!(history.get(&placed.id), Some(&placed));
        assert_eq!(history.get(&OrderId::generate()), None);
    }
}
