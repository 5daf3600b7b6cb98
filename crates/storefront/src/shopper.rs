//! Per-shopper state kept in the session.
//!
//! The [`Shopper`] extractor gives handlers typed access to the cart,
//! wishlist, order history and checkout flow stored in the shopper's session.
//! Handlers load a container, mutate it, and save it back; each session is
//! only touched by one request at a time from the shopper's point of view.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Serialize, de::DeserializeOwned};
use tower_sessions::Session;

use crate::checkout::CheckoutFlow;
use crate::error::AppError;
use crate::models::session_keys;
use crate::store::{Cart, OrderHistory, Wishlist};

/// Typed handle on the current shopper's session.
#[derive(Debug, Clone)]
pub struct Shopper {
    session: Session,
}

impl<S> FromRequestParts<S> for Shopper
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self::new)
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))
    }
}

impl Shopper {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    async fn load<T>(&self, key: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.session.get::<T>(key).await?.unwrap_or_default())
    }

    async fn store<T>(&self, key: &str, value: &T) -> Result<(), AppError>
    where
        T: Serialize + Send + Sync,
    {
        self.session.insert(key, value).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn cart(&self) -> Result<Cart, AppError> {
        self.load(session_keys::CART).await
    }

    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn save_cart(&self, cart: &Cart) -> Result<(), AppError> {
        self.store(session_keys::CART, cart).await
    }

    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn wishlist(&self) -> Result<Wishlist, AppError> {
        self.load(session_keys::WISHLIST).await
    }

    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn save_wishlist(&self, wishlist: &Wishlist) -> Result<(), AppError> {
        self.store(session_keys::WISHLIST, wishlist).await
    }

    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn orders(&self) -> Result<OrderHistory, AppError> {
        self.load(session_keys::ORDERS).await
    }

    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn save_orders(&self, orders: &OrderHistory) -> Result<(), AppError> {
        self.store(session_keys::ORDERS, orders).await
    }

    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn checkout(&self) -> Result<CheckoutFlow, AppError> {
        self.load(session_keys::CHECKOUT).await
    }

    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn save_checkout(&self, flow: &CheckoutFlow) -> Result<(), AppError> {
        self.store(session_keys::CHECKOUT, flow).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::store::cart::tests::product;

    fn shopper() -> Shopper {
        Shopper::new(Session::new(None, Arc::new(MemoryStore::default()), None))
    }

    #[tokio::test]
    async fn test_missing_state_loads_empty() {
        let shopper = shopper();
        assert!(shopper.cart().await.unwrap().is_empty());
        assert!(shopper.wishlist().await.unwrap().is_empty());
        assert!(shopper.orders().await.unwrap().is_empty());
        assert_eq!(shopper.checkout().await.unwrap(), CheckoutFlow::default());
    }

    #[tokio::test]
    async fn test_cart_survives_roundtrip_through_session() {
        let shopper = shopper();
        let mut cart = shopper.cart().await.unwrap();
        cart.add(product("mat", "Yoga Mat", Decimal::new(2500, 2)), 2);
        shopper.save_cart(&cart).await.unwrap();

        assert_eq!(shopper.cart().await.unwrap(), cart);
    }
}
