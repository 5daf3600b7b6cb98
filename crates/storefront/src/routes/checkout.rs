//! Checkout route handlers (require auth).

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nepfit_core::PaymentMethod;

use super::cart::CartView;
use crate::checkout::{CardDetails, CheckoutStatus, place_order};
use crate::error::{Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::models::{Order, ShippingDetails};
use crate::shopper::Shopper;
use crate::state::AppState;

/// Checkout page data.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub checkout: CheckoutStatus,
    pub cart: CartView,
    pub payment_methods: Vec<PaymentMethodOption>,
}

/// A selectable payment method.
#[derive(Debug, Serialize)]
pub struct PaymentMethodOption {
    pub method: PaymentMethod,
    pub label: &'static str,
}

/// Payment selection request.
#[derive(Debug, Deserialize)]
pub struct SelectPaymentRequest {
    pub method: PaymentMethod,
}

/// Confirmation request.
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub shipping: ShippingDetails,
    #[serde(default)]
    pub discount_code: Option<String>,
}

/// Current checkout progress with the cart being bought.
#[instrument(skip(shopper, user), fields(user_id = %user.id))]
pub async fn show(RequireAuth(user): RequireAuth, shopper: Shopper) -> Result<Json<CheckoutView>> {
    let flow = shopper.checkout().await?;
    let cart = shopper.cart().await?;

    Ok(Json(CheckoutView {
        checkout: flow.status(),
        cart: CartView::from(&cart),
        payment_methods: PaymentMethod::ALL
            .iter()
            .map(|&method| PaymentMethodOption {
                method,
                label: method.label(),
            })
            .collect(),
    }))
}

/// Choose a payment method.
#[instrument(skip(shopper, user), fields(user_id = %user.id))]
pub async fn select_payment(
    RequireAuth(user): RequireAuth,
    shopper: Shopper,
    Json(request): Json<SelectPaymentRequest>,
) -> Result<Json<CheckoutStatus>> {
    let mut flow = shopper.checkout().await?;
    flow.select_payment(request.method);
    shopper.save_checkout(&flow).await?;
    Ok(Json(flow.status()))
}

/// Enter card details for a card payment.
#[instrument(skip(shopper, user, card), fields(user_id = %user.id))]
pub async fn enter_card(
    RequireAuth(user): RequireAuth,
    shopper: Shopper,
    Json(card): Json<CardDetails>,
) -> Result<Json<CheckoutStatus>> {
    let mut flow = shopper.checkout().await?;
    flow.enter_card(card)?;
    shopper.save_checkout(&flow).await?;
    Ok(Json(flow.status()))
}

/// Place the order.
///
/// On success the order joins the session's history and the cart is emptied.
#[instrument(skip(state, shopper, user, request), fields(user_id = %user.id))]
pub async fn confirm(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    shopper: Shopper,
    Json(request): Json<ConfirmRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let mut flow = shopper.checkout().await?;
    let mut cart = shopper.cart().await?;
    let mut orders = shopper.orders().await?;

    let order = place_order(
        &mut flow,
        &mut cart,
        &mut orders,
        request.shipping,
        request.discount_code.as_deref(),
        state.backend().discounts.as_ref(),
    )
    .await?;

    shopper.save_orders(&orders).await?;
    shopper.save_cart(&cart).await?;
    shopper.save_checkout(&flow).await?;

    add_breadcrumb("checkout", "Order placed", &[("order_id", order.id.as_str())]);
    Ok((StatusCode::CREATED, Json(order)))
}
