//! Blob download handler for review images.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Serve a stored blob by key.
///
/// `nosniff` keeps browsers on the stored content type.
#[instrument(skip(state))]
pub async fn download(State(state): State<AppState>, Path(key): Path<String>) -> Result<Response> {
    let blob = state
        .backend()
        .blobs
        .download(&key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("media {key}")))?;

    let mut response = (
        [
            (header::CONTENT_TYPE, blob.content_type),
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable".to_string()),
        ],
        blob.bytes,
    )
        .into_response();
    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    Ok(response)
}
