//! Session-related types.
//!
//! Types stored in the session for authentication and shopper state.

use serde::{Deserialize, Serialize};

use nepfit_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Auth provider user id.
    pub id: UserId,
    /// Email the user signed in with.
    pub email: Email,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current signed-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the shopper's cart.
    pub const CART: &str = "cart";

    /// Key for the shopper's wishlist.
    pub const WISHLIST: &str = "wishlist";

    /// Key for the orders placed during this session.
    pub const ORDERS: &str = "orders";

    /// Key for the in-progress checkout flow.
    pub const CHECKOUT: &str = "checkout";

    /// Keys that belong to the signed-in user rather than the browser.
    /// Dropped whenever the user changes.
    pub const USER_SCOPED: [&str; 2] = [ORDERS, CHECKOUT];
}
