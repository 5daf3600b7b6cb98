//! NepFit Storefront library.
//!
//! Shopper-facing fitness store: catalog search, cart, wishlist, checkout,
//! order history, reviews and member profiles, served as a JSON API over a
//! pluggable backend. This crate provides the storefront functionality as a
//! library, allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod shopper;
pub mod state;
pub mod store;

use axum::{Router, extract::Request, routing::get};
use tower_http::trace::TraceLayer;

use backend::seed::{SeedData, SeedError};
use backend::{Backend, MemoryBackend};
use config::StorefrontConfig;
use state::AppState;

/// Build application state backed by the in-memory backend, seeded from
/// `config.seed_path` when set.
///
/// # Errors
///
/// Returns `SeedError` if the seed file cannot be read or parsed.
pub fn in_memory_state(config: StorefrontConfig) -> Result<AppState, SeedError> {
    let memory = match &config.seed_path {
        Some(path) => {
            let seed = SeedData::load(path)?;
            for problem in seed.problems() {
                tracing::warn!(path = %path.display(), "Seed problem: {problem}");
            }
            tracing::info!(
                products = seed.products.len(),
                discount_codes = seed.discount_codes.len(),
                "Seed catalog loaded"
            );
            MemoryBackend::seeded(config.base_url.clone(), seed)
        }
        None => {
            tracing::warn!("NEPFIT_SEED_PATH not set, starting with an empty catalog");
            MemoryBackend::new(config.base_url.clone())
        }
    };

    Ok(AppState::new(config, Backend::in_memory(memory)))
}

/// The full storefront router with its middleware stack.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
