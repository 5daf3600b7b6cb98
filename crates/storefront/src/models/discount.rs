//! Discount code documents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A percentage-off code from the discount-codes collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCode {
    pub code: String,
    /// Percentage off the subtotal, e.g. `10` for 10%.
    pub percent_off: Decimal,
    /// Codes are looked up by code *and* this flag.
    #[serde(default = "default_valid")]
    pub valid: bool,
}

const fn default_valid() -> bool {
    true
}

impl DiscountCode {
    /// Whether the percentage is usable (above 0, at most 100).
    #[must_use]
    pub fn has_sane_percentage(&self) -> bool {
        self.percent_off > Decimal::ZERO && self.percent_off <= Decimal::ONE_HUNDRED
    }
}
