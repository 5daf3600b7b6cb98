//! Checkout state machine.
//!
//! ```text
//! SelectingPayment ──select_payment──▶ EnteringPaymentDetails ──confirm──▶ Confirmed
//!                                         ▲        │ enter_card
//!                                         └────────┘
//! ```
//!
//! Confirmation is the only step with side effects: it appends an [`Order`] to
//! the history and clears the cart. There is no rollback. Selecting a payment
//! method after confirmation starts a fresh checkout.

pub mod totals;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use nepfit_core::{OrderId, PaymentMethod};

use crate::backend::{BackendError, DiscountCodes};
use crate::models::{CardSummary, DiscountCode, Order, ShippingDetails};
use crate::store::{Cart, OrderHistory};

/// Errors that stop a checkout step. None of them change any state.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("this checkout has already been confirmed")]
    AlreadyConfirmed,

    #[error("no payment method selected")]
    NoPaymentSelected,

    #[error("card details are only accepted for card payments")]
    NotCardPayment,

    #[error("cart is empty")]
    EmptyCart,

    #[error("card details are incomplete")]
    IncompleteCard,

    #[error("shipping field `{0}` is required")]
    MissingShipping(&'static str),

    #[error("invalid discount code: {0}")]
    InvalidDiscountCode(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Raw card fields as typed by the shopper. Not validated beyond presence.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    #[serde(default)]
    pub holder: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub cvv: String,
}

impl CardDetails {
    /// All four fields are non-blank.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.holder, &self.number, &self.expiry, &self.cvv]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// The parts safe to keep on an order.
    #[must_use]
    pub fn summary(&self) -> CardSummary {
        let digits: Vec<char> = self.number.chars().filter(char::is_ascii_digit).collect();
        let last_four = digits
            .get(digits.len().saturating_sub(4)..)
            .unwrap_or_default()
            .iter()
            .collect();
        CardSummary {
            holder: self.holder.trim().to_owned(),
            last_four,
            expiry: self.expiry.trim().to_owned(),
        }
    }
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("holder", &self.holder)
            .field("number", &"[REDACTED]")
            .field("expiry", &self.expiry)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

/// Where the shopper is in checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckoutFlow {
    #[default]
    SelectingPayment,
    EnteringPaymentDetails {
        method: PaymentMethod,
        #[serde(default)]
        card: CardDetails,
    },
    Confirmed {
        order_id: OrderId,
    },
}

/// Client-facing view of a [`CheckoutFlow`] with card fields withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutStatus {
    pub state: &'static str,
    pub payment_method: Option<PaymentMethod>,
    pub card_complete: bool,
    pub order_id: Option<OrderId>,
}

impl CheckoutFlow {
    /// Choose how to pay. Switching to a non-card method clears card fields.
    pub fn select_payment(&mut self, method: PaymentMethod) {
        let card = match std::mem::take(self) {
            Self::EnteringPaymentDetails { card, .. } if method.requires_card() => card,
            _ => CardDetails::default(),
        };
        *self = Self::EnteringPaymentDetails { method, card };
    }

    /// Store card fields for a card payment.
    ///
    /// # Errors
    ///
    /// Fails unless a card payment is currently selected.
    pub fn enter_card(&mut self, details: CardDetails) -> Result<(), CheckoutError> {
        match self {
            Self::EnteringPaymentDetails { method, card } if method.requires_card() => {
                *card = details;
                Ok(())
            }
            Self::EnteringPaymentDetails { .. } => Err(CheckoutError::NotCardPayment),
            Self::SelectingPayment => Err(CheckoutError::NoPaymentSelected),
            Self::Confirmed { .. } => Err(CheckoutError::AlreadyConfirmed),
        }
    }

    /// Place the order.
    ///
    /// On success the order is appended to `history`, `cart` is emptied and
    /// the flow moves to `Confirmed`. On error nothing changes.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` when no payment is selected, the cart is empty,
    /// card fields are missing for a card payment, or a required shipping
    /// field is blank.
    pub fn confirm(
        &mut self,
        cart: &mut Cart,
        history: &mut OrderHistory,
        shipping: ShippingDetails,
        discount: Option<&DiscountCode>,
    ) -> Result<Order, CheckoutError> {
        let (method, card) = match self {
            Self::EnteringPaymentDetails { method, card } => (*method, card),
            Self::SelectingPayment => return Err(CheckoutError::NoPaymentSelected),
            Self::Confirmed { .. } => return Err(CheckoutError::AlreadyConfirmed),
        };

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if method.requires_card() && !card.is_complete() {
            return Err(CheckoutError::IncompleteCard);
        }
        if let Some(field) = shipping.first_missing_field() {
            return Err(CheckoutError::MissingShipping(field));
        }

        let order = Order {
            id: OrderId::generate(),
            payment_method: method,
            card: method.requires_card().then(|| card.summary()),
            items: cart.lines().to_vec(),
            shipping,
            totals: totals::compute(cart.subtotal(), discount),
            placed_at: Utc::now(),
        };

        history.add_order(order.clone());
        cart.clear();
        *self = Self::Confirmed {
            order_id: order.id.clone(),
        };

        Ok(order)
    }

    #[must_use]
    pub fn status(&self) -> CheckoutStatus {
        match self {
            Self::SelectingPayment => CheckoutStatus {
                state: "selecting_payment",
                payment_method: None,
                card_complete: false,
                order_id: None,
            },
            Self::EnteringPaymentDetails { method, card } => CheckoutStatus {
                state: "entering_payment_details",
                payment_method: Some(*method),
                card_complete: card.is_complete(),
                order_id: None,
            },
            Self::Confirmed { order_id } => CheckoutStatus {
                state: "confirmed",
                payment_method: None,
                card_complete: false,
                order_id: Some(order_id.clone()),
            },
        }
    }
}

/// Resolve `discount_code` against the backend, then confirm.
///
/// A code that is unknown, flagged invalid or carries an unusable percentage
/// is rejected before anything else happens. Blank codes mean no discount.
///
/// # Errors
///
/// Returns `CheckoutError::InvalidDiscountCode`, any error from
/// [`CheckoutFlow::confirm`], or a backend failure.
#[instrument(skip(flow, cart, history, shipping, discounts))]
pub async fn place_order(
    flow: &mut CheckoutFlow,
    cart: &mut Cart,
    history: &mut OrderHistory,
    shipping: ShippingDetails,
    discount_code: Option<&str>,
    discounts: &dyn DiscountCodes,
) -> Result<Order, CheckoutError> {
    let discount = match discount_code.map(str::trim).filter(|code| !code.is_empty()) {
        Some(code) => Some(
            discounts
                .find_valid(code)
                .await?
                .filter(DiscountCode::has_sane_percentage)
                .ok_or_else(|| CheckoutError::InvalidDiscountCode(code.to_owned()))?,
        ),
        None => None,
    };

    let order = flow.confirm(cart, history, shipping, discount.as_ref())?;
    tracing::info!(
        order_id = %order.id,
        total = %order.totals.final_amount,
        "Order placed"
    );
    Ok(order)
}
