//! Order money totals.

use rust_decimal::Decimal;

use nepfit_core::round_money;

use crate::models::{DiscountCode, OrderTotals};

/// Apply an optional percentage discount to `subtotal`.
///
/// The discount is rounded to cents and never exceeds the subtotal.
#[must_use]
pub fn compute(subtotal: Decimal, discount: Option<&DiscountCode>) -> OrderTotals {
    let Some(discount) = discount else {
        return OrderTotals {
            subtotal,
            discount_code: None,
            discount_amount: Decimal::ZERO,
            final_amount: subtotal,
        };
    };

    let amount = round_money(subtotal * discount.percent_off / Decimal::ONE_HUNDRED).min(subtotal);
    OrderTotals {
        subtotal,
        discount_code: Some(discount.code.clone()),
        discount_amount: amount,
        final_amount: subtotal - amount,
    }
}
