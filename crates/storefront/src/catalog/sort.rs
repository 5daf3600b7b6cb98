//! Catalog sort orders.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::Product;

/// How the product grid is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "priceLowToHigh")]
    PriceLowToHigh,
    #[serde(rename = "priceHighToLow")]
    PriceHighToLow,
    #[default]
    #[serde(rename = "name")]
    Name,
}

impl SortOrder {
    /// Parse a sort key. Unknown keys fall back to [`SortOrder::Name`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "priceLowToHigh" => Self::PriceLowToHigh,
            "priceHighToLow" => Self::PriceHighToLow,
            _ => Self::Name,
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::PriceLowToHigh => a.price.cmp(&b.price),
            Self::PriceHighToLow => b.price.cmp(&a.price),
            Self::Name => compare_names(&a.name, &b.name),
        }
    }
}

/// Case-insensitive first, so "apple" sorts next to "Apple" rather than after "Zebra".
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Reorder `products` by `order`.
#[must_use]
pub fn sort_products(mut products: Vec<Product>, order: SortOrder) -> Vec<Product> {
    products.sort_by(|a, b| order.compare(a, b));
    products
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::store::cart::tests::product;

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_price_low_to_high() {
        let products = vec![
            product("a", "A", Decimal::from(10)),
            product("b", "B", Decimal::from(5)),
        ];
        let sorted = sort_products(products, SortOrder::PriceLowToHigh);
        assert_eq!(names(&sorted), ["B", "A"]);
    }

    #[test]
    fn test_price_orders_are_reverses_for_unique_prices() {
        let products = vec![
            product("1", "Rope", Decimal::new(1299, 2)),
            product("2", "Mat", Decimal::new(2500, 2)),
            product("3", "Band", Decimal::new(499, 2)),
            product("4", "Bench", Decimal::new(18900, 2)),
        ];

        let ascending = sort_products(products.clone(), SortOrder::PriceLowToHigh);
        let mut descending = sort_products(products, SortOrder::PriceHighToLow);
        descending.reverse();

        assert_eq!(ascending, descending);
    }

    #[test]
    fn test_name_sort_is_idempotent() {
        let products = vec![
            product("1", "rope", Decimal::ONE),
            product("2", "Mat", Decimal::ONE),
            product("3", "Band", Decimal::ONE),
            product("4", "band", Decimal::ONE),
        ];

        let once = sort_products(products, SortOrder::Name);
        let twice = sort_products(once.clone(), SortOrder::Name);

        assert_eq!(once, twice);
        assert_eq!(names(&once), ["Band", "band", "Mat", "rope"]);
    }

    #[test]
    fn test_unknown_key_defaults_to_name() {
        assert_eq!(SortOrder::from_key("newest"), SortOrder::Name);
        assert_eq!(SortOrder::from_key("priceHighToLow"), SortOrder::PriceHighToLow);
        assert_eq!(SortOrder::default(), SortOrder::Name);
    }
}
