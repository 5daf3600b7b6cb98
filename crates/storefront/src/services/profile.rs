//! User profile service.

use tracing::instrument;

use nepfit_core::{SubscriptionPlan, UserId};

use crate::backend::{Backend, BackendError, UserDirectory};
use crate::models::{ProfileUpdate, UserProfile};
use crate::services::auth::{AuthError, is_digits};

/// Profile reads and edits for a signed-in user.
pub struct ProfileService<'a> {
    users: &'a dyn UserDirectory,
}

impl<'a> ProfileService<'a> {
    #[must_use]
    pub fn new(backend: &'a Backend) -> Self {
        Self {
            users: backend.users.as_ref(),
        }
    }

    /// The stored profile, or a blank one when no document exists.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the lookup fails.
    pub async fn get(&self, id: &UserId) -> Result<UserProfile, BackendError> {
        Ok(self
            .users
            .get_profile(id)
            .await?
            .unwrap_or_else(|| UserProfile::blank(id.clone())))
    }

    /// Apply the fields present in `update`, held to the same rules as sign-up.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if the name is blank.
    /// Returns `AuthError::InvalidPhone` if the phone is not all digits.
    /// Returns `AuthError::Backend` if the read or write fails.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserProfile, AuthError> {
        let name = update.name.as_deref().map(str::trim);
        if name.is_some_and(str::is_empty) {
            return Err(AuthError::MissingField("name"));
        }
        let phone = update.phone.as_deref().map(str::trim);
        if phone.is_some_and(|phone| !is_digits(phone)) {
            return Err(AuthError::InvalidPhone);
        }

        let mut profile = self.get(id).await?;
        if let Some(name) = name {
            profile.name = name.to_owned();
        }
        if let Some(age) = update.age {
            profile.age = Some(age);
        }
        if let Some(phone) = phone {
            profile.phone = phone.to_owned();
        }
        self.users.put_profile(profile.clone()).await?;
        Ok(profile)
    }

    /// Record the chosen subscription plan.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the read or write fails.
    #[instrument(skip(self))]
    pub async fn select_plan(
        &self,
        id: &UserId,
        plan: SubscriptionPlan,
    ) -> Result<UserProfile, BackendError> {
        let mut profile = self.get(id).await?;
        profile.plan = Some(plan);
        self.users.put_profile(profile.clone()).await?;
        tracing::info!(user_id = %id, %plan, "Subscription plan selected");
        Ok(profile)
    }
}
