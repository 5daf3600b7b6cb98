//! Account route handlers (require auth).

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use nepfit_core::SubscriptionPlan;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{Order, ProfileUpdate, UserProfile};
use crate::services::ProfileService;
use crate::shopper::Shopper;
use crate::state::AppState;

/// Plan selection request.
#[derive(Debug, Deserialize)]
pub struct SelectPlanRequest {
    pub plan: SubscriptionPlan,
}

/// The signed-in user's profile.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<UserProfile>> {
    let profile = ProfileService::new(state.backend()).get(&user.id).await?;
    Ok(Json(profile))
}

/// Edit name, age or phone.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>> {
    let profile = ProfileService::new(state.backend())
        .update(&user.id, update)
        .await?;
    Ok(Json(profile))
}

/// Choose a subscription plan.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn select_plan(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<SelectPlanRequest>,
) -> Result<Json<UserProfile>> {
    let profile = ProfileService::new(state.backend())
        .select_plan(&user.id, request.plan)
        .await?;
    Ok(Json(profile))
}

/// Orders placed in this session, oldest first.
#[instrument(skip(shopper, user), fields(user_id = %user.id))]
pub async fn orders(RequireAuth(user): RequireAuth, shopper: Shopper) -> Result<Json<Vec<Order>>> {
    Ok(Json(shopper.orders().await?.orders().to_vec()))
}
