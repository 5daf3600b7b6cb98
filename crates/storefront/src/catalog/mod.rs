//! Product search, category filtering and sorting.
//!
//! Everything here is a pure projection over an in-memory product list,
//! recomputed from its inputs on every call. There is no index.

mod sort;

pub use sort::{SortOrder, sort_products};

use nepfit_core::CategoryFilter;

use crate::models::Product;

/// Search box text plus the category picker selection.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Free-text query matched against product names.
    pub text: String,
    pub category: CategoryFilter,
}

impl ProductQuery {
    #[must_use]
    pub fn new(text: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    /// Whether `product` passes both the text and the category condition.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.text.to_lowercase();
        product.name.to_lowercase().contains(&needle) && self.category.matches(&product.category)
    }
}

/// Products whose name contains the query (case-insensitive) and whose
/// category passes the filter. Input order is preserved.
#[must_use]
pub fn search(products: &[Product], query: &ProductQuery) -> Vec<Product> {
    products
        .iter()
        .filter(|product| query.matches(product))
        .cloned()
        .collect()
}

/// Picker options: `All` first, then each distinct category in first-seen order.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = vec![CategoryFilter::ALL_LABEL.to_owned()];
    for product in products {
        if !seen.iter().any(|c| c == &product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::store::cart::tests::product;

    fn with_category(mut product: Product, category: &str) -> Product {
        product.category = category.to_owned();
        product
    }

    fn catalog() -> Vec<Product> {
        vec![
            with_category(product("1", "Yoga Mat", Decimal::TEN), "Yoga"),
            with_category(product("2", "Kettlebell", Decimal::TEN), "Weights"),
            with_category(product("3", "Yoga Block", Decimal::ONE), "Yoga"),
            with_category(product("4", "Dumbbell Set", Decimal::ONE), "Weights"),
        ]
    }

    #[test]
    fn test_empty_query_and_all_returns_input() {
        let products = catalog();
        let result = search(&products, &ProductQuery::default());
        assert_eq!(result, products);
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let result = search(&catalog(), &ProductQuery::new("BELL", CategoryFilter::All));
        let names: Vec<_> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Kettlebell", "Dumbbell Set"]);
    }

    #[test]
    fn test_query_and_category_must_both_hold() {
        let query = ProductQuery::new("yoga", CategoryFilter::from_label("Weights"));
        assert!(search(&catalog(), &query).is_empty());

        let query = ProductQuery::new("yoga", CategoryFilter::from_label("Yoga"));
        assert_eq!(search(&catalog(), &query).len(), 2);
    }

    #[test]
    fn test_categories_all_first_then_first_seen() {
        assert_eq!(categories(&catalog()), ["All", "Yoga", "Weights"]);
        assert_eq!(categories(&[]), ["All"]);
    }
}
