//! The managed-backend seam.
//!
//! # Architecture
//!
//! The storefront is a thin client over a hosted backend that provides
//! authentication, a document database and blob storage. Each capability is a
//! trait so the rest of the crate never names a vendor:
//!
//! - [`Catalog`] - product collection (read-only apart from review aggregation)
//! - [`ReviewStore`] - reviews collection with a live query
//! - [`UserDirectory`] - users collection (profiles)
//! - [`DiscountCodes`] - discount-codes collection
//! - [`AuthProvider`] - email/password accounts
//! - [`BlobStorage`] - review images
//!
//! [`MemoryBackend`] implements all of them in-process and is what the binary
//! and the tests run against.
//!
//! No timeouts or retries are layered on top; calls fail straight through to
//! the caller.

mod memory;
pub mod seed;

pub use memory::MemoryBackend;

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use nepfit_core::{Email, ProductId, Rating, UserId};

use crate::models::{DiscountCode, NewReview, Product, Review, UserProfile};

/// Errors surfaced by backend calls.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The referenced document does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A uniqueness rule was violated (e.g. email already registered).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend could not be reached or refused the call.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Stored data could not be interpreted.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Callback for live review results.
pub type ReviewListener = Arc<dyn Fn(&[Review]) + Send + Sync>;

/// Handle for a live query. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Wrap the action that tears the live query down.
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unsubscribe now instead of at drop.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Product catalog collection.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Every product, in collection order.
    async fn list_products(&self) -> Result<Vec<Product>, BackendError>;

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, BackendError>;

    /// Fold a new review rating into the product's summary.
    async fn record_rating(&self, id: &ProductId, rating: Rating) -> Result<(), BackendError>;
}

/// Reviews collection.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Newest-first reviews for a product, at most `limit`.
    async fn list_reviews(
        &self,
        product_id: &ProductId,
        limit: usize,
    ) -> Result<Vec<Review>, BackendError>;

    async fn create_review(&self, review: NewReview) -> Result<Review, BackendError>;

    /// Live query over the same results as [`ReviewStore::list_reviews`].
    ///
    /// `listener` is called with the current results straight away and again
    /// whenever they change, until the returned [`Subscription`] is dropped.
    fn subscribe(
        &self,
        product_id: &ProductId,
        limit: usize,
        listener: ReviewListener,
    ) -> Subscription;
}

/// Users collection.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_profile(&self, id: &UserId) -> Result<Option<UserProfile>, BackendError>;

    /// Create or replace the profile document.
    async fn put_profile(&self, profile: UserProfile) -> Result<(), BackendError>;
}

/// Discount-codes collection.
#[async_trait]
pub trait DiscountCodes: Send + Sync {
    /// Look a code up by its text *and* the validity flag.
    async fn find_valid(&self, code: &str) -> Result<Option<DiscountCode>, BackendError>;
}

/// Email/password authentication.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Register a new account.
    ///
    /// # Errors
    ///
    /// `BackendError::Conflict` if the email is already registered.
    async fn create_account(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<UserId, BackendError>;

    /// Check credentials; `None` when they do not match an account.
    async fn verify_password(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<Option<UserId>, BackendError>;
}

/// A stored blob.
#[derive(Debug, Clone)]
pub struct Blob {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Blob storage for review images.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store `bytes` under `key` and return the public download URL.
    async fn upload(&self, key: &str, blob: Blob) -> Result<Url, BackendError>;

    async fn download(&self, key: &str) -> Result<Option<Blob>, BackendError>;

    async fn delete(&self, key: &str) -> Result<(), BackendError>;
}

/// All backend capabilities, cheaply cloneable.
#[derive(Clone)]
pub struct Backend {
    pub catalog: Arc<dyn Catalog>,
    pub reviews: Arc<dyn ReviewStore>,
    pub users: Arc<dyn UserDirectory>,
    pub discounts: Arc<dyn DiscountCodes>,
    pub auth: Arc<dyn AuthProvider>,
    pub blobs: Arc<dyn BlobStorage>,
}

impl Backend {
    /// Serve every capability from one in-memory backend.
    #[must_use]
    pub fn in_memory(memory: MemoryBackend) -> Self {
        Self::in_memory_shared(Arc::new(memory))
    }

    /// Like [`Backend::in_memory`], keeping a handle on the backend.
    #[must_use]
    pub fn in_memory_shared(memory: Arc<MemoryBackend>) -> Self {
        Self {
            catalog: memory.clone(),
            reviews: memory.clone(),
            users: memory.clone(),
            discounts: memory.clone(),
            auth: memory.clone(),
            blobs: memory,
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_subscription_cancels_once_on_drop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let subscription = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        drop(subscription);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_explicit_cancel_does_not_double_fire() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let subscription = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        subscription.cancel();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
