//! Wishlist route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nepfit_core::ProductId;

use super::find_product;
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::shopper::Shopper;
use crate::state::AppState;

/// Wishlist request body.
#[derive(Debug, Deserialize)]
pub struct WishlistRequest {
    pub product_id: ProductId,
}

/// Result of a wishlist change.
#[derive(Debug, Serialize)]
pub struct WishlistChange {
    /// Whether the call changed the wishlist.
    pub changed: bool,
    pub entries: Vec<Product>,
}

/// Saved products.
#[instrument(skip(shopper))]
pub async fn show(shopper: Shopper) -> Result<Json<Vec<Product>>> {
    Ok(Json(shopper.wishlist().await?.entries().to_vec()))
}

/// Save a product. Saving one that is already there changes nothing.
#[instrument(skip(state, shopper))]
pub async fn add(
    State(state): State<AppState>,
    shopper: Shopper,
    Json(request): Json<WishlistRequest>,
) -> Result<Json<WishlistChange>> {
    let product = find_product(&state, &request.product_id).await?;

    let mut wishlist = shopper.wishlist().await?;
    let changed = wishlist.add(product);
    if changed {
        shopper.save_wishlist(&wishlist).await?;
    }

    Ok(Json(WishlistChange {
        changed,
        entries: wishlist.entries().to_vec(),
    }))
}

/// Drop a saved product.
#[instrument(skip(shopper))]
pub async fn remove(
    shopper: Shopper,
    Json(request): Json<WishlistRequest>,
) -> Result<Json<WishlistChange>> {
    let mut wishlist = shopper.wishlist().await?;
    if !wishlist.remove(&request.product_id) {
        return Err(AppError::NotFound(format!(
            "wishlist entry for product {}",
            request.product_id
        )));
    }
    shopper.save_wishlist(&wishlist).await?;

    Ok(Json(WishlistChange {
        changed: true,
        entries: wishlist.entries().to_vec(),
    }))
}
