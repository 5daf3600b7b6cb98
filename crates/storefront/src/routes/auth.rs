//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::{AuthService, SignIn, SignUp};
use crate::state::AppState;

/// Whether someone is signed in, and who.
#[derive(Debug, Serialize)]
pub struct AuthStateView {
    pub signed_in: bool,
    pub user: Option<CurrentUser>,
}

impl From<Option<CurrentUser>> for AuthStateView {
    fn from(user: Option<CurrentUser>) -> Self {
        Self {
            signed_in: user.is_some(),
            user,
        }
    }
}

async fn start_session(session: &Session, user: &CurrentUser) -> Result<()> {
    set_current_user(session, user).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

/// Create an account and sign in.
#[instrument(skip(state, session, form))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<SignUp>,
) -> Result<(StatusCode, Json<AuthStateView>)> {
    let user = AuthService::new(state.backend()).sign_up(form).await?;
    start_session(&session, &user).await?;
    Ok((StatusCode::CREATED, Json(Some(user).into())))
}

/// Sign in with email and password.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<SignIn>,
) -> Result<Json<AuthStateView>> {
    let user = AuthService::new(state.backend()).sign_in(form).await?;
    start_session(&session, &user).await?;
    tracing::info!(user_id = %user.id, "Signed in");
    Ok(Json(Some(user).into()))
}

/// Sign out. The cart and wishlist stay with the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<AuthStateView>> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(Json(None.into()))
}

/// Current auth state.
pub async fn state(OptionalAuth(user): OptionalAuth) -> Json<AuthStateView> {
    Json(user.into())
}
