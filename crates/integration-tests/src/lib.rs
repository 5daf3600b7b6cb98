//! Integration tests for NepFit.
//!
//! Each test starts the full storefront router on an ephemeral port, backed
//! by a seeded in-memory backend, and drives it over HTTP with a
//! cookie-keeping client, the same way a browser session would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nepfit-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::str::FromStr;

use nepfit_core::ProductId;
use nepfit_storefront::backend::seed::SeedData;
use nepfit_storefront::backend::{Backend, MemoryBackend};
use nepfit_storefront::config::{ConfigError, StorefrontConfig};
use nepfit_storefront::models::{DiscountCode, Product, ReviewSummary};
use nepfit_storefront::state::AppState;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;

/// Errors starting a test server.
pub type SetupError = Box<dyn std::error::Error + Send + Sync>;

/// A running storefront plus a client holding one shopper's session.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub state: AppState,
}

impl TestContext {
    /// Start a storefront seeded with [`sample_seed`].
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the client cannot be built.
    pub async fn start() -> Result<Self, SetupError> {
        Self::with_seed(sample_seed()).await
    }

    /// Start a storefront seeded with `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the client cannot be built.
    pub async fn with_seed(seed: SeedData) -> Result<Self, SetupError> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let base_url = format!("http://{addr}");

        let config = test_config(&base_url)?;
        let backend = Backend::in_memory(MemoryBackend::seeded(config.base_url.clone(), seed));
        let state = AppState::new(config, backend);
        let app = nepfit_storefront::app(state.clone());

        tokio::spawn(async move {
            // Runs until the test's runtime shuts down.
            let _ = axum::serve(listener, app).await;
        });

        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            base_url,
            state,
        })
    }

    /// A second shopper against the same server, with its own cookie jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn other_shopper(&self) -> Result<Client, SetupError> {
        Ok(Client::builder().cookie_store(true).build()?)
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sign up and stay signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is not accepted.
    pub async fn sign_up(&self, email: &str) -> Result<Value, SetupError> {
        let response = self
            .client
            .post(self.url("/auth/signup"))
            .json(&serde_json::json!({
                "email": email,
                "password": "hunter22",
                "name": "Test Shopper",
                "age": "30",
                "phone": "5550100",
            }))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Add `quantity` of a product to this shopper's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is not accepted.
    pub async fn add_to_cart(&self, product_id: &str, quantity: u32) -> Result<Value, SetupError> {
        let response = self
            .client
            .post(self.url("/cart/add"))
            .json(&serde_json::json!({ "product_id": product_id, "quantity": quantity }))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

fn test_config(base_url: &str) -> Result<StorefrontConfig, ConfigError> {
    let base_url = base_url.to_owned();
    StorefrontConfig::from_lookup(move |key| match key {
        "NEPFIT_BASE_URL" => Some(base_url.clone()),
        "NEPFIT_REVIEW_LIMIT" => Some("3".to_owned()),
        _ => None,
    })
}

/// A product for seeding.
#[must_use]
pub fn product(id: &str, name: &str, price: &str, category: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Decimal::from_str(price).unwrap_or_default(),
        description: String::new(),
        category: category.to_owned(),
        image_url: None,
        stock: 20,
        reviews: ReviewSummary::default(),
    }
}

/// Four products over two categories and two discount codes, one disabled.
#[must_use]
pub fn sample_seed() -> SeedData {
    SeedData {
        products: vec![
            product("mat", "Yoga Mat", "25.00", "Yoga"),
            product("kb16", "Kettlebell 16kg", "50.00", "Weights"),
            product("block", "Yoga Block", "12.50", "Yoga"),
            product("bands", "Resistance Bands", "19.99", "Accessories"),
        ],
        discount_codes: vec![
            DiscountCode {
                code: "SAVE10".to_owned(),
                percent_off: Decimal::TEN,
                valid: true,
            },
            DiscountCode {
                code: "EXPIRED".to_owned(),
                percent_off: Decimal::from(50),
                valid: false,
            },
        ],
    }
}

/// Read a decimal money field, accepting either a JSON string or number.
#[must_use]
pub fn money(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}
