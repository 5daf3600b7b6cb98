//! Product reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nepfit_core::{ProductId, Rating, ReviewId, UserId};

/// A stored review document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub author_id: UserId,
    pub body: String,
    pub rating: Rating,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A review about to be written. The backend assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: ProductId,
    pub author_id: UserId,
    pub body: String,
    pub rating: Rating,
    pub image_url: Option<String>,
}

/// An image attached to a review submission, before upload.
#[derive(Clone)]
pub struct ReviewImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ReviewImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
