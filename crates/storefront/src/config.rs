//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `NEPFIT_BASE_URL` - Public URL for the storefront (also the root of media URLs)
//!
//! ## Optional
//! - `NEPFIT_HOST` - Bind address (default: 127.0.0.1)
//! - `NEPFIT_PORT` - Listen port (default: 3000)
//! - `NEPFIT_SEED_PATH` - JSON file of products and discount codes to load at startup
//! - `NEPFIT_REVIEW_LIMIT` - Reviews shown per product (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::services::DEFAULT_REVIEW_LIMIT;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Seed catalog to load into the in-memory backend
    pub seed_path: Option<PathBuf>,
    /// Maximum reviews listed per product
    pub review_limit: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(lookup);

        let host: IpAddr = vars.parsed_or("NEPFIT_HOST", "127.0.0.1")?;
        let port: u16 = vars.parsed_or("NEPFIT_PORT", "3000")?;
        let base_url = vars.required("NEPFIT_BASE_URL")?;
        let base_url = Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("NEPFIT_BASE_URL".to_string(), e.to_string()))?;
        let seed_path = vars.optional("NEPFIT_SEED_PATH").map(PathBuf::from);
        let review_limit: usize =
            vars.parsed_or("NEPFIT_REVIEW_LIMIT", &DEFAULT_REVIEW_LIMIT.to_string())?;
        if review_limit == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "NEPFIT_REVIEW_LIMIT".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            base_url,
            seed_path,
            review_limit,
            sentry_dsn: vars.optional("SENTRY_DSN"),
            sentry_environment: vars.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the public URL is served over TLS (controls secure cookies).
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    /// Get an optional variable; blank counts as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parsed_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key)
            .unwrap_or_else(|| default.to_string())
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("NEPFIT_BASE_URL", "http://localhost:3000")]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.review_limit, 10);
        assert_eq!(config.seed_path, None);
        assert_eq!(config.sentry_dsn, None);
        assert!(!config.is_https());
    }

    #[test]
    fn test_base_url_required() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "NEPFIT_BASE_URL"));

        let err = load(&[("NEPFIT_BASE_URL", "   ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[
            ("NEPFIT_BASE_URL", "http://localhost:3000"),
            ("NEPFIT_PORT", "eighty"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "NEPFIT_PORT"));

        let err = load(&[("NEPFIT_BASE_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));

        let err = load(&[
            ("NEPFIT_BASE_URL", "http://localhost:3000"),
            ("NEPFIT_REVIEW_LIMIT", "0"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("NEPFIT_BASE_URL", "https://shop.nepfit.example"),
            ("NEPFIT_HOST", "0.0.0.0"),
            ("NEPFIT_PORT", "8080"),
            ("NEPFIT_SEED_PATH", "seed/catalog.json"),
            ("NEPFIT_REVIEW_LIMIT", "25"),
            ("SENTRY_ENVIRONMENT", "staging"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.seed_path, Some(PathBuf::from("seed/catalog.json")));
        assert_eq!(config.review_limit, 25);
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
        assert!(config.is_https());
    }
}
