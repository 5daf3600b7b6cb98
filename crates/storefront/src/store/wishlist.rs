//! Saved-for-later products.

use serde::{Deserialize, Serialize};

use nepfit_core::ProductId;

use crate::models::Product;

/// Presence-only list of product snapshots, keyed by product id.
///
/// Two different products that happen to share a name are kept as separate
/// entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    entries: Vec<Product>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Save `product`. Returns `false` (and changes nothing) if it is already saved.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.entries.push(product);
        true
    }

    /// Remove the entry for `product_id`. Returns `false` if it was not saved.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.id != product_id);
        self.entries.len() != before
    }

    /// Remove every entry whose product name equals `name`; returns how many went.
    pub fn remove_named(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.name != name);
        before - self.entries.len()
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.iter().any(|entry| &entry.id == product_id)
    }

    #[must_use]
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::store::cart::tests::product;

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut wishlist = Wishlist::new();
        let mat = product("1", "Yoga Mat", Decimal::TEN);

        assert!(wishlist.add(mat.clone()));
        assert!(!wishlist.add(mat));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_same_name_different_id_kept_apart() {
        let mut wishlist = Wishlist::new();
        wishlist.add(product("1", "Yoga Mat", Decimal::TEN));
        wishlist.add(product("2", "Yoga Mat", Decimal::ONE));

        assert_eq!(wishlist.len(), 2);
    }

    #[test]
    fn test_remove_by_id() {
        let mut wishlist = Wishlist::new();
        wishlist.add(product("1", "Yoga Mat", Decimal::TEN));
        wishlist.add(product("2", "Foam Roller", Decimal::TEN));

        assert!(wishlist.remove(&ProductId::new("1")));
        assert!(!wishlist.contains(&ProductId::new("1")));
        assert!(wishlist.contains(&ProductId::new("2")));
    }

    #[test]
    fn test_remove_named_drops_all_matches() {
        let mut wishlist = Wishlist::new();
        wishlist.add(product("1", "Yoga Mat", Decimal::TEN));
        wishlist.add(product("2", "Yoga Mat", Decimal::ONE));
        wishlist.add(product("3", "Foam Roller", Decimal::ONE));

        assert_eq!(wishlist.remove_named("Yoga Mat"), 2);
        assert_eq!(wishlist.len(), 1);
    }
}
