//! Authentication service.
//!
//! Email/password accounts live with the [`AuthProvider`]; the profile that
//! sign-up collects goes to the [`UserDirectory`].

mod error;

pub use error::AuthError;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::instrument;

use nepfit_core::Email;

use crate::backend::{AuthProvider, Backend, BackendError, UserDirectory};
use crate::models::{CurrentUser, UserProfile};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Sign-up form. Every field is required.
#[derive(Debug, Deserialize)]
pub struct SignUp {
    #[serde(default)]
    pub email: String,
    pub password: SecretString,
    #[serde(default)]
    pub name: String,
    /// Digits only.
    #[serde(default)]
    pub age: String,
    /// Digits only.
    #[serde(default)]
    pub phone: String,
}

/// Sign-in form.
#[derive(Debug, Deserialize)]
pub struct SignIn {
    pub email: String,
    pub password: SecretString,
}

/// Authentication service.
///
/// Handles account registration and password sign-in.
pub struct AuthService<'a> {
    auth: &'a dyn AuthProvider,
    users: &'a dyn UserDirectory,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(backend: &'a Backend) -> Self {
        Self {
            auth: backend.auth.as_ref(),
            users: backend.users.as_ref(),
        }
    }

    /// Register a new account and write its profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if any field is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::InvalidAge` / `AuthError::InvalidPhone` for non-digit input.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn sign_up(&self, form: SignUp) -> Result<CurrentUser, AuthError> {
        let password = form.password.expose_secret();
        for (field, value) in [
            ("email", form.email.as_str()),
            ("password", password),
            ("name", form.name.as_str()),
            ("age", form.age.as_str()),
            ("phone", form.phone.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(AuthError::MissingField(field));
            }
        }

        let email = Email::parse(&form.email)?;
        validate_password(password)?;
        let age = parse_age(&form.age)?;
        let phone = form.phone.trim();
        if !is_digits(phone) {
            return Err(AuthError::InvalidPhone);
        }

        let id = self
            .auth
            .create_account(&email, &form.password)
            .await
            .map_err(|e| match e {
                BackendError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Backend(other),
            })?;

        self.users
            .put_profile(UserProfile {
                id: id.clone(),
                name: form.name.trim().to_owned(),
                email: email.as_str().to_owned(),
                age: Some(age),
                phone: phone.to_owned(),
                plan: None,
                created_at: Some(Utc::now()),
            })
            .await?;

        tracing::info!(user_id = %id, "Account created");
        Ok(CurrentUser { id, email })
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn sign_in(&self, form: SignIn) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(&form.email)?;

        let id = self
            .auth
            .verify_password(&email, &form.password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(CurrentUser { id, email })
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

pub(crate) fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn parse_age(value: &str) -> Result<u8, AuthError> {
    let value = value.trim();
    if !is_digits(value) {
        return Err(AuthError::InvalidAge);
    }
    value.parse().map_err(|_| AuthError::InvalidAge)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;
    use crate::backend::MemoryBackend;

    fn backend() -> Backend {
        Backend::in_memory(MemoryBackend::new(
            Url::parse("http://localhost:3000").unwrap(),
        ))
    }

    fn form() -> SignUp {
        SignUp {
            email: "asha@example.com".to_owned(),
            password: SecretString::from("secret1"),
            name: "Asha".to_owned(),
            age: "29".to_owned(),
            phone: "9800000000".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_writes_profile_then_sign_in() {
        let backend = backend();
        let service = AuthService::new(&backend);

        let user = service.sign_up(form()).await.unwrap();
        let profile = backend.users.get_profile(&user.id).await.unwrap().unwrap();
        assert_eq!(profile.name, "Asha");
        assert_eq!(profile.age, Some(29));
        assert_eq!(profile.plan, None);

        let signed_in = service
            .sign_in(SignIn {
                email: "asha@example.com".to_owned(),
                password: SecretString::from("secret1"),
            })
            .await
            .unwrap();
        assert_eq!(signed_in, user);
    }

    #[tokio::test]
    async fn test_sign_up_field_rules() {
        let backend = backend();
        let service = AuthService::new(&backend);

        let err = service
            .sign_up(SignUp {
                name: String::new(),
                ..form()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingField("name")));

        let err = service
            .sign_up(SignUp {
                password: SecretString::from("short"),
                ..form()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));

        let err = service
            .sign_up(SignUp {
                age: "twenty".to_owned(),
                ..form()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidAge));

        let err = service
            .sign_up(SignUp {
                phone: "+977-98".to_owned(),
                ..form()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidPhone));
    }

    #[tokio::test]
    async fn test_wrong_password_and_duplicate() {
        let backend = backend();
        let service = AuthService::new(&backend);
        service.sign_up(form()).await.unwrap();

        let err = service.sign_up(form()).await.unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));

        let err = service
            .sign_in(SignIn {
                email: "asha@example.com".to_owned(),
                password: SecretString::from("wrong-one"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_age_overflow_rejected() {
        assert!(matches!(parse_age("300"), Err(AuthError::InvalidAge)));
        assert_eq!(parse_age(" 42 ").unwrap(), 42);
    }
}
