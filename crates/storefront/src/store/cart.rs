//! Shopping cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nepfit_core::ProductId;

use crate::models::Product;

/// One product held for purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// The shopper's cart: at most one line per product id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of `product`.
    ///
    /// If the product is already in the cart its quantity grows by `quantity`;
    /// otherwise a new line is appended. Stock is not checked. Adding zero
    /// units does nothing.
    pub fn add(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.line_mut(&product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine { product, quantity }),
        }
    }

    /// Set the quantity of an existing line. Clamping is the caller's job.
    ///
    /// Returns `false` when the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        self.line_mut(product_id)
            .map(|line| line.quantity = quantity)
            .is_some()
    }

    /// Remove the line for `product_id`. Returns `false` if there was none.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.product.id != product_id);
        self.lines.len() != before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// All lines, in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity held for `product_id` (zero when absent).
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| &line.product.id == product_id)
            .map_or(0, |line| line.quantity)
    }

    /// Sum of price × quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| &line.product.id == product_id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::ReviewSummary;

    pub(crate) fn product(id: &str, name: &str, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price,
            description: String::new(),
            category: "Gear".to_owned(),
            image_url: None,
            stock: 10,
            reviews: ReviewSummary::default(),
        }
    }

    #[test]
    fn test_add_same_product_merges_quantity() {
        let mut cart = Cart::new();
        let p1 = product("1", "Mat", Decimal::new(20, 0));

        cart.add(p1.clone(), 1);
        cart.add(p1, 2);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(&ProductId::new("1")), 3);
    }

    #[test]
    fn test_add_distinct_products_appends_in_order() {
        let mut cart = Cart::new();
        cart.add(product("b", "Band", Decimal::ONE), 1);
        cart.add(product("a", "Rope", Decimal::ONE), 1);

        let ids: Vec<_> = cart.lines().iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("1", "Mat", Decimal::ONE), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_directly() {
        let mut cart = Cart::new();
        cart.add(product("1", "Mat", Decimal::ONE), 5);

        assert!(cart.update_quantity(&ProductId::new("1"), 2));
        assert_eq!(cart.quantity_of(&ProductId::new("1")), 2);
        assert!(!cart.update_quantity(&ProductId::new("missing"), 2));
    }

    #[test]
    fn test_remove_only_touches_matching_line() {
        let mut cart = Cart::new();
        cart.add(product("1", "Mat", Decimal::ONE), 1);
        cart.add(product("2", "Rope", Decimal::ONE), 4);
        cart.add(product("3", "Band", Decimal::ONE), 2);

        assert!(cart.remove(&ProductId::new("2")));
        assert!(!cart.remove(&ProductId::new("2")));

        let remaining: Vec<_> = cart
            .lines()
            .iter()
            .map(|l| (l.product.id.as_str(), l.quantity))
            .collect();
        assert_eq!(remaining, [("1", 1), ("3", 2)]);
    }

    #[test]
    fn test_subtotal_and_count() {
        let mut cart = Cart::new();
        cart.add(product("1", "Mat", Decimal::new(2550, 2)), 2);
        cart.add(product("2", "Rope", Decimal::new(999, 2)), 1);

        assert_eq!(cart.subtotal(), Decimal::new(6099, 2));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add(product("1", "Mat", Decimal::ONE), 1);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }
}
