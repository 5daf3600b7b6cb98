//! Cart route handlers.
//!
//! The cart lives in the shopper's session. Each handler loads it, applies
//! one change and stores it back.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nepfit_core::{CurrencyCode, Price, ProductId};

use super::find_product;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::shopper::Shopper;
use crate::state::AppState;
use crate::store::{Cart, CartLine};

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub image_url: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub display_line_total: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub subtotal: Decimal,
    pub display_subtotal: String,
}

fn display(amount: Decimal) -> String {
    Price::new(amount, CurrencyCode::default()).display()
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        let line_total = line.line_total();
        Self {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            image_url: line.product.image_url.clone(),
            quantity: line.quantity,
            unit_price: line.product.price,
            line_total,
            display_line_total: display(line_total),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            item_count: cart.item_count(),
            subtotal,
            display_subtotal: display(subtotal),
        }
    }
}

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    /// Defaults to 1; values below 1 are raised to 1.
    pub quantity: Option<u32>,
}

/// Update quantity request.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    /// Values below 1 are raised to 1; use remove to drop a line.
    pub quantity: u32,
}

/// Remove from cart request.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Display the cart.
#[instrument(skip(shopper))]
pub async fn show(shopper: Shopper) -> Result<Json<CartView>> {
    let cart = shopper.cart().await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add a product to the cart, merging with an existing line.
#[instrument(skip(state, shopper))]
pub async fn add(
    State(state): State<AppState>,
    shopper: Shopper,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product = find_product(&state, &request.product_id).await?;
    let quantity = request.quantity.unwrap_or(1).max(1);

    let mut cart = shopper.cart().await?;
    cart.add(product, quantity);
    shopper.save_cart(&cart).await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        &[("product_id", request.product_id.as_str())],
    );
    Ok(Json(CartView::from(&cart)))
}

/// Set the quantity of a line already in the cart.
#[instrument(skip(shopper))]
pub async fn update(
    shopper: Shopper,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let mut cart = shopper.cart().await?;
    if !cart.update_quantity(&request.product_id, request.quantity.max(1)) {
        return Err(AppError::NotFound(format!(
            "cart line for product {}",
            request.product_id
        )));
    }
    shopper.save_cart(&cart).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Remove a line from the cart.
#[instrument(skip(shopper))]
pub async fn remove(
    shopper: Shopper,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let mut cart = shopper.cart().await?;
    if !cart.remove(&request.product_id) {
        return Err(AppError::NotFound(format!(
            "cart line for product {}",
            request.product_id
        )));
    }
    shopper.save_cart(&cart).await?;
    Ok(Json(CartView::from(&cart)))
}
