//! Order records created at checkout.
//!
//! An [`Order`] is built once when checkout is confirmed and never changes
//! afterwards. It snapshots the cart lines so later catalog edits do not
//! rewrite history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nepfit_core::{OrderId, PaymentMethod};

use crate::store::CartLine;

/// Where an order ships to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub full_name: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

impl ShippingDetails {
    /// Name of the first required field left blank, if any.
    #[must_use]
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("full_name", &self.full_name),
            ("address_line1", &self.address_line1),
            ("city", &self.city),
            ("country", &self.country),
            ("phone", &self.phone),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// The part of a card kept on the order. Never includes the CVV or full number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSummary {
    pub holder: String,
    pub last_four: String,
    pub expiry: String,
}

/// Money totals computed at confirmation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount_code: Option<String>,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
}

/// A completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub payment_method: PaymentMethod,
    pub card: Option<CardSummary>,
    pub items: Vec<CartLine>,
    pub shipping: ShippingDetails,
    pub totals: OrderTotals,
    pub placed_at: DateTime<Utc>,
}
