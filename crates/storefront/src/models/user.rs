//! User profile documents.
//!
//! Profiles live in the users collection, keyed by the auth provider's user id.
//! They are separate from the auth account itself: an account can exist
//! without a profile, in which case the profile reads back blank.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nepfit_core::{SubscriptionPlan, UserId};

/// A user's profile (domain type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Auth provider user id; also the document key.
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub plan: Option<SubscriptionPlan>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// A profile with every field blank, used when no document exists.
    #[must_use]
    pub const fn blank(id: UserId) -> Self {
        Self {
            id,
            name: String::new(),
            email: String::new(),
            age: None,
            phone: String::new(),
            plan: None,
            created_at: None,
        }
    }
}

/// Editable profile fields. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub phone: Option<String>,
}
