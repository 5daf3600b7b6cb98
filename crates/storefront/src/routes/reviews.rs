//! Product review route handlers.
//!
//! `GET /products/{id}/reviews/live` is a server-sent event stream fed by a
//! backend live query. The subscription lives inside the stream, so it is
//! dropped (and the live query torn down) when the client goes away.

use std::convert::Infallible;
use std::sync::Arc;

use async_stream::stream;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::instrument;

use nepfit_core::ProductId;

use crate::backend::ReviewListener;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Review, ReviewImage};
use crate::services::ReviewService;
use crate::state::AppState;

/// Largest accepted image after base64 decoding.
const MAX_IMAGE_BYTES: usize = 1024 * 1024;

/// Raster types served back from `/media`. Scriptable formats such as SVG
/// are refused.
const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Image attached to a review, base64-encoded.
#[derive(Debug, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    /// Standard base64 with padding.
    pub data: String,
}

/// Review submission body.
#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    pub body: String,
    pub rating: i64,
    #[serde(default)]
    pub image: Option<ImageUpload>,
}

impl ImageUpload {
    fn decode(self) -> Result<ReviewImage> {
        let content_type = self.content_type.trim().to_ascii_lowercase();
        if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
            return Err(AppError::BadRequest(format!(
                "unsupported image type {}",
                self.content_type
            )));
        }
        let bytes = STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| AppError::BadRequest(format!("image data is not valid base64: {e}")))?;
        if bytes.is_empty() || bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::BadRequest(format!(
                "image must be between 1 and {MAX_IMAGE_BYTES} bytes"
            )));
        }
        Ok(ReviewImage {
            file_name: self.file_name,
            content_type,
            bytes,
        })
    }
}

fn service(state: &AppState) -> ReviewService<'_> {
    ReviewService::new(state.backend(), state.config().review_limit)
}

/// Newest reviews for a product.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Review>>> {
    let reviews = service(&state).list(&ProductId::new(id)).await?;
    Ok(Json(reviews))
}

/// Submit a review for a product.
#[instrument(skip(state, user, request), fields(user_id = %user.id))]
pub async fn submit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(request): Json<SubmitReviewRequest>,
) -> Result<(StatusCode, Json<Review>)> {
    let image = request.image.map(ImageUpload::decode).transpose()?;

    let review = service(&state)
        .submit(
            &user.id,
            &ProductId::new(id),
            &request.body,
            request.rating,
            image,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// Live review feed as server-sent events.
///
/// Each `reviews` event carries the full current list, newest first.
#[instrument(skip(state))]
pub async fn live(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Sse<impl futures::Stream<Item = std::result::Result<Event, Infallible>>> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<Review>>();
    let listener: ReviewListener = Arc::new(move |reviews: &[Review]| {
        // A closed channel means the client is gone and the stream is dropping.
        let _ = tx.send(reviews.to_vec());
    });

    let subscription = service(&state).subscribe(&ProductId::new(id), listener);

    let updates = stream! {
        let _subscription = subscription;
        while let Some(reviews) = rx.recv().await {
            yield reviews;
        }
    };

    let sse_stream = updates.map(|reviews| {
        let json = serde_json::to_string(&reviews)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize reviews"}"#.to_string());
        Ok(Event::default().event("reviews").data(json))
    });

    Sse::new(sse_stream).keep_alive(KeepAlive::default())
}
