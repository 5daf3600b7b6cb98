//! Authentication extractors.
//!
//! Provides extractors for requiring a signed-in user in route handlers.
//! Auth state is the `CurrentUser` stored in the session at sign-in.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// `None` without a session layer, `Some(None)` when signed out.
///
/// An unreadable session value counts as signed out.
async fn session_user(parts: &Parts) -> Option<Option<CurrentUser>> {
    let session = parts.extensions.get::<Session>()?;
    Some(
        session
            .get::<CurrentUser>(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten(),
    )
}

/// Extractor that requires a signed-in user.
///
/// Rejects with 401 if nobody is signed in. Checkout, account and review
/// submission handlers take this.
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but nobody is signed in.
#[derive(Debug)]
pub enum AuthRejection {
    /// No session layer in front of the handler.
    MissingSession,
    /// Session exists but carries no user.
    SignedOut,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::MissingSession => {
                tracing::error!("RequireAuth used without a session layer");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::SignedOut => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Sign in required" })),
            )
                .into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match session_user(parts).await {
            None => Err(AuthRejection::MissingSession),
            Some(None) => Err(AuthRejection::SignedOut),
            Some(Some(user)) => Ok(Self(user)),
        }
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is signed in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_user(parts).await.flatten()))
    }
}

/// Helper to set the current user in the session (sign-in).
///
/// The session id is cycled first so a pre-login id cannot be reused, and
/// any order history or checkout left by a previous user is dropped.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    drop_user_state(session).await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (sign-out).
///
/// Cart and wishlist stay with the session; order history and checkout
/// progress leave with the user.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    drop_user_state(session).await
}

async fn drop_user_state(session: &Session) -> Result<(), tower_sessions::session::Error> {
    for key in session_keys::USER_SCOPED {
        session.remove_value(key).await?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use nepfit_core::{Email, UserId};
    use tower_sessions::MemoryStore;

    use super::*;

    fn user(id: &str, email: &str) -> CurrentUser {
        CurrentUser {
            id: UserId::new(id),
            email: Email::parse(email).unwrap(),
        }
    }

    async fn session_with_state() -> Session {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        for key in [
            session_keys::CART,
            session_keys::WISHLIST,
            session_keys::ORDERS,
            session_keys::CHECKOUT,
        ] {
            session.insert(key, key).await.unwrap();
        }
        session
    }

    async fn has(session: &Session, key: &str) -> bool {
        session.get_value(key).await.unwrap().is_some()
    }

    #[tokio::test]
    async fn test_sign_out_drops_orders_and_checkout_keeps_cart() {
        let session = session_with_state().await;
        set_current_user(&session, &user("a", "a@nepfit.test"))
            .await
            .unwrap();
        session.insert(session_keys::ORDERS, "a-orders").await.unwrap();

        clear_current_user(&session).await.unwrap();

        assert!(!has(&session, session_keys::CURRENT_USER).await);
        assert!(!has(&session, session_keys::ORDERS).await);
        assert!(!has(&session, session_keys::CHECKOUT).await);
        assert!(has(&session, session_keys::CART).await);
        assert!(has(&session, session_keys::WISHLIST).await);
    }

    #[tokio::test]
    async fn test_sign_in_starts_without_previous_user_state() {
        let session = session_with_state().await;

        set_current_user(&session, &user("b", "b@nepfit.test"))
            .await
            .unwrap();

        assert!(!has(&session, session_keys::ORDERS).await);
        assert!(!has(&session, session_keys::CHECKOUT).await);
        assert!(has(&session, session_keys::CART).await);
        let current: Option<CurrentUser> = session.get(session_keys::CURRENT_USER).await.unwrap();
        assert_eq!(current.map(|u| u.id), Some(UserId::new("b")));
    }
}
