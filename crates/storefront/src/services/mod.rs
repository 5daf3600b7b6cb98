//! Business logic services for storefront.
//!
//! Each service borrows the capabilities it needs from the [`Backend`] for the
//! duration of one request.
//!
//! # Services
//!
//! - `auth` - Sign-up and password sign-in
//! - `profile` - Profile reads, edits and plan selection
//! - `reviews` - Review listing, submission and live feed
//!
//! [`Backend`]: crate::backend::Backend

pub mod auth;
pub mod profile;
pub mod reviews;

pub use auth::{AuthError, AuthService, SignIn, SignUp};
pub use profile::ProfileService;
pub use reviews::{DEFAULT_REVIEW_LIMIT, ReviewError, ReviewService};
