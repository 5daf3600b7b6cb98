//! Product review service.
//!
//! Submission uploads the optional image first and then writes the review with
//! the image's download URL. When the review write fails the uploaded image is
//! deleted again so no blob is left without a review pointing at it.

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use nepfit_core::{ProductId, Rating, RatingError, UserId};

use crate::backend::{
    Backend, BackendError, Blob, BlobStorage, Catalog, ReviewListener, ReviewStore, Subscription,
};
use crate::models::{NewReview, Review, ReviewImage};

/// Reviews shown per product when not configured otherwise.
pub const DEFAULT_REVIEW_LIMIT: usize = 10;

/// Errors submitting or reading reviews.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error(transparent)]
    InvalidRating(#[from] RatingError),

    #[error("review text is required")]
    EmptyBody,

    #[error("unknown product {0}")]
    UnknownProduct(ProductId),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Review operations for one request.
pub struct ReviewService<'a> {
    reviews: &'a dyn ReviewStore,
    blobs: &'a dyn BlobStorage,
    catalog: &'a dyn Catalog,
    limit: usize,
}

impl<'a> ReviewService<'a> {
    #[must_use]
    pub fn new(backend: &'a Backend, limit: usize) -> Self {
        Self {
            reviews: backend.reviews.as_ref(),
            blobs: backend.blobs.as_ref(),
            catalog: backend.catalog.as_ref(),
            limit,
        }
    }

    /// Newest reviews for a product, at most the configured limit.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Backend` if the query fails.
    pub async fn list(&self, product_id: &ProductId) -> Result<Vec<Review>, ReviewError> {
        Ok(self.reviews.list_reviews(product_id, self.limit).await?)
    }

    /// Live version of [`ReviewService::list`].
    pub fn subscribe(&self, product_id: &ProductId, listener: ReviewListener) -> Subscription {
        self.reviews.subscribe(product_id, self.limit, listener)
    }

    /// Validate and store a review, uploading its image first.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::InvalidRating` for ratings outside 1..=5,
    /// `ReviewError::EmptyBody` for blank text, `ReviewError::UnknownProduct`
    /// when the product does not exist, or `ReviewError::Backend`.
    #[instrument(skip(self, body, image), fields(product_id = %product_id, author = %author))]
    pub async fn submit(
        &self,
        author: &UserId,
        product_id: &ProductId,
        body: &str,
        rating: i64,
        image: Option<ReviewImage>,
    ) -> Result<Review, ReviewError> {
        let rating = Rating::new(rating)?;
        let body = body.trim();
        if body.is_empty() {
            return Err(ReviewError::EmptyBody);
        }
        if self.catalog.get_product(product_id).await?.is_none() {
            return Err(ReviewError::UnknownProduct(product_id.clone()));
        }

        let uploaded = match image {
            Some(image) => {
                let key = image_key(
                    Utc::now().timestamp_millis(),
                    &Uuid::new_v4().simple().to_string(),
                    &image.file_name,
                );
                let url = self
                    .blobs
                    .upload(
                        &key,
                        Blob {
                            content_type: image.content_type,
                            bytes: image.bytes,
                        },
                    )
                    .await?;
                Some((key, url))
            }
            None => None,
        };

        let written = self
            .reviews
            .create_review(NewReview {
                product_id: product_id.clone(),
                author_id: author.clone(),
                body: body.to_owned(),
                rating,
                image_url: uploaded.as_ref().map(|(_, url)| url.to_string()),
            })
            .await;

        let review = match written {
            Ok(review) => review,
            Err(e) => {
                if let Some((key, _)) = &uploaded {
                    if let Err(cleanup) = self.blobs.delete(key).await {
                        tracing::warn!(
                            key = %key,
                            error = %cleanup,
                            "Failed to delete orphaned review image"
                        );
                    }
                }
                return Err(e.into());
            }
        };

        if let Err(e) = self.catalog.record_rating(product_id, rating).await {
            tracing::warn!(error = %e, "Review stored but product rating not updated");
        }

        Ok(review)
    }
}

/// Blob key for a review image: `reviews/<unix-millis>-<name>`.
fn image_key(millis: i64, nonce: &str, file_name: &str) -> String {
    let name: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let name = if name.trim_matches(['.', '_']).is_empty() {
        "image".to_owned()
    } else {
        name
    };
    format!("reviews/{millis}-{nonce}-{name}")
}
