//! Catalog product documents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nepfit_core::{ProductId, Rating};

/// A product as stored in the catalog collection.
///
/// Field aliases accept the camelCase names used by the mobile client's
/// documents (`productName`, `categories`, `imageUrl`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(alias = "productName")]
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "categories")]
    pub category: String,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub reviews: ReviewSummary,
}

/// Running aggregate of review ratings for a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub count: u32,
    pub total_stars: u32,
}

impl ReviewSummary {
    /// Fold one more rating into the aggregate.
    pub fn record(&mut self, rating: Rating) {
        self.count = self.count.saturating_add(1);
        self.total_stars = self.total_stars.saturating_add(u32::from(rating.stars()));
    }

    /// Mean rating to one decimal place, `None` before the first review.
    #[must_use]
    pub fn average(&self) -> Option<Decimal> {
        if self.count == 0 {
            return None;
        }
        let mean = Decimal::from(self.total_stars) / Decimal::from(self.count);
        Some(mean.round_dp(1))
    }
}
