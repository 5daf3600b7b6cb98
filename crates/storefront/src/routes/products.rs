//! Product catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nepfit_core::{CategoryFilter, CurrencyCode, Price, ProductId};

use super::find_product;
use crate::catalog::{self, ProductQuery, SortOrder};
use crate::error::Result;
use crate::models::Product;
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    /// Search text matched against product names.
    pub q: Option<String>,
    /// Category label; blank or `All` means no filter.
    pub category: Option<String>,
    /// `priceLowToHigh`, `priceHighToLow` or `name`.
    pub sort: Option<String>,
}

/// Product as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub display_price: String,
    pub average_rating: Option<Decimal>,
    pub in_stock: bool,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            display_price: Price::new(product.price, CurrencyCode::default()).display(),
            average_rating: product.reviews.average(),
            in_stock: product.stock > 0,
            product,
        }
    }
}

/// Search, filter and sort the catalog.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> Result<Json<Vec<ProductView>>> {
    let products = state.backend().catalog.list_products().await?;

    let query = ProductQuery::new(
        params.q.unwrap_or_default(),
        CategoryFilter::from_label(params.category.as_deref().unwrap_or_default()),
    );
    let order = params
        .sort
        .as_deref()
        .map_or_else(SortOrder::default, SortOrder::from_key);

    let matches = catalog::sort_products(catalog::search(&products, &query), order);
    Ok(Json(matches.into_iter().map(ProductView::from).collect()))
}

/// Category picker options.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let products = state.backend().catalog.list_products().await?;
    Ok(Json(catalog::categories(&products)))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>> {
    let product = find_product(&state, &ProductId::new(id)).await?;
    Ok(Json(product.into()))
}
