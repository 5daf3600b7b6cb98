//! Authentication error types.

use thiserror::Error;

use crate::backend::BackendError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] nepfit_core::EmailError),

    /// A required sign-up field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Age was not a whole number.
    #[error("age must be a whole number")]
    InvalidAge,

    /// Phone contained something other than digits.
    #[error("phone number must contain digits only")]
    InvalidPhone,

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Backend error.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}
