//! Seed data for the in-memory backend.
//!
//! A seed file is JSON:
//!
//! ```json
//! {
//!   "products": [{ "id": "mat", "name": "Yoga Mat", "price": "25.00", "category": "Yoga" }],
//!   "discount_codes": [{ "code": "SAVE10", "percent_off": "10" }]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DiscountCode, Product};

/// Errors loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Collections to pre-populate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub discount_codes: Vec<DiscountCode>,
}

impl SeedData {
    /// Read and parse a seed file.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if the file cannot be read or is not valid seed JSON.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
            path: display,
            source,
        })
    }

    /// Problems that would make the storefront misbehave. Empty means clean.
    #[must_use]
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut ids = HashSet::new();
        for product in &self.products {
            if !ids.insert(&product.id) {
                problems.push(format!("duplicate product id {}", product.id));
            }
            if product.name.trim().is_empty() {
                problems.push(format!("product {} has no name", product.id));
            }
            if product.price < Decimal::ZERO {
                problems.push(format!("product {} has a negative price", product.id));
            }
        }

        let mut codes = HashSet::new();
        for discount in &self.discount_codes {
            if !codes.insert(discount.code.as_str()) {
                problems.push(format!("duplicate discount code {}", discount.code));
            }
            if !discount.has_sane_percentage() {
                problems.push(format!(
                    "discount code {} has percent_off {} outside (0, 100]",
                    discount.code, discount.percent_off
                ));
            }
        }

        problems
    }
}
