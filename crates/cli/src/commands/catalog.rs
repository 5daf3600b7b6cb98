//! Catalog queries against a seed file.
//!
//! Runs the same search, filter and sort the storefront applies to
//! `GET /products`, so a seed catalog can be checked from the terminal.

use std::path::Path;

use nepfit_core::{CategoryFilter, CurrencyCode, Price};
use nepfit_storefront::backend::seed::SeedData;
use nepfit_storefront::catalog::{self, ProductQuery, SortOrder};
use nepfit_storefront::models::Product;

use super::CommandError;

/// One row of search output: id, name, category and formatted price.
fn render_row(product: &Product) -> String {
    let price = Price::new(product.price, CurrencyCode::default()).display();
    format!(
        "{:<16} {:<32} {:<16} {price}",
        product.id.as_str(),
        product.name,
        product.category
    )
}

/// Search, filter and sort the products in a seed file.
pub fn search_rows(products: &[Product], query: &str, category: &str, sort: &str) -> Vec<String> {
    let query = ProductQuery::new(query, CategoryFilter::from_label(category));
    let matches = catalog::search(products, &query);
    catalog::sort_products(matches, SortOrder::from_key(sort))
        .iter()
        .map(render_row)
        .collect()
}

/// `nepfit catalog search`
///
/// # Errors
///
/// Returns an error if the seed file cannot be loaded.
pub fn search(
    seed: &Path,
    query: &str,
    category: &str,
    sort: &str,
) -> Result<Vec<String>, CommandError> {
    let data = SeedData::load(seed)?;
    let rows = search_rows(&data.products, query, category, sort);
    tracing::info!(
        total = data.products.len(),
        matched = rows.len(),
        "Catalog search finished"
    );
    Ok(rows)
}

/// `nepfit catalog categories`
///
/// # Errors
///
/// Returns an error if the seed file cannot be loaded.
pub fn categories(seed: &Path) -> Result<Vec<String>, CommandError> {
    let data = SeedData::load(seed)?;
    Ok(catalog::categories(&data.products))
}
