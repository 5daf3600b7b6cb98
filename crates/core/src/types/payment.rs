//! Payment methods offered at checkout.

use core::fmt;

use serde::{Deserialize, Serialize};

/// How a shopper pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card. The only method that needs extra details.
    Card,
    #[serde(rename = "paypal", alias = "pay_pal")]
    PayPal,
    CashOnDelivery,
}

impl PaymentMethod {
    /// All methods in the order they are offered.
    pub const ALL: [Self; 3] = [Self::Card, Self::PayPal, Self::CashOnDelivery];

    /// Whether confirming this method requires card fields.
    #[must_use]
    pub const fn requires_card(self) -> bool {
        matches!(self, Self::Card)
    }

    /// Shopper-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Card => "Credit/Debit Card",
            Self::PayPal => "PayPal",
            Self::CashOnDelivery => "Cash on Delivery",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" | "Credit/Debit Card" => Ok(Self::Card),
            "pay_pal" | "paypal" | "PayPal" => Ok(Self::PayPal),
            "cash_on_delivery" | "Cash on Delivery" => Ok(Self::CashOnDelivery),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_card_requires_details() {
        let needing: Vec<_> = PaymentMethod::ALL
            .into_iter()
            .filter(|m| m.requires_card())
            .collect();
        assert_eq!(needing, vec![PaymentMethod::Card]);
    }

    #[test]
    fn test_parses_labels_and_keys() {
        assert_eq!(
            "Cash on Delivery".parse::<PaymentMethod>(),
            Ok(PaymentMethod::CashOnDelivery)
        );
        assert_eq!("paypal".parse::<PaymentMethod>(), Ok(PaymentMethod::PayPal));
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }
}
