//! In-process backend.
//!
//! Holds every collection in memory behind std locks. Nothing survives a
//! restart. Locks are never held across an `.await` or while calling a
//! review listener.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;
use url::Url;

use nepfit_core::{Email, ProductId, Rating, ReviewId, UserId};

use super::seed::SeedData;
use super::{
    AuthProvider, BackendError, Blob, BlobStorage, Catalog, DiscountCodes, ReviewListener,
    ReviewStore, Subscription, UserDirectory,
};
use crate::models::{DiscountCode, NewReview, Product, Review, UserProfile};

/// Path under the base URL where blobs are served.
pub const MEDIA_PREFIX: &str = "media/";

struct Account {
    id: UserId,
    password_hash: String,
}

struct Feed {
    id: u64,
    product_id: ProductId,
    limit: usize,
    listener: ReviewListener,
}

#[derive(Default)]
struct ReviewTable {
    /// Insertion order.
    reviews: Vec<Review>,
    feeds: Vec<Feed>,
    next_feed_id: u64,
}

impl ReviewTable {
    fn newest_first(&self, product_id: &ProductId, limit: usize) -> Vec<Review> {
        let mut matching: Vec<Review> = self
            .reviews
            .iter()
            .rev()
            .filter(|review| &review.product_id == product_id)
            .cloned()
            .collect();
        // Stable, so equal timestamps keep newest-inserted first.
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit);
        matching
    }
}

/// Every backend capability, held in memory.
pub struct MemoryBackend {
    base_url: Url,
    products: RwLock<Vec<Product>>,
    discount_codes: RwLock<Vec<DiscountCode>>,
    reviews: Arc<Mutex<ReviewTable>>,
    profiles: RwLock<HashMap<UserId, UserProfile>>,
    accounts: RwLock<HashMap<Email, Account>>,
    blobs: RwLock<HashMap<String, Blob>>,
}

impl MemoryBackend {
    /// Empty backend whose blob URLs are rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            products: RwLock::new(Vec::new()),
            discount_codes: RwLock::new(Vec::new()),
            reviews: Arc::new(Mutex::new(ReviewTable::default())),
            profiles: RwLock::new(HashMap::new()),
            accounts: RwLock::new(HashMap::new()),
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Backend pre-populated with products and discount codes.
    #[must_use]
    pub fn seeded(base_url: Url, seed: SeedData) -> Self {
        let backend = Self::new(base_url);
        *write(&backend.products) = seed.products;
        *write(&backend.discount_codes) = seed.discount_codes;
        backend
    }

    #[cfg(test)]
    pub(crate) fn stored_blob_keys(&self) -> Vec<String> {
        read(&self.blobs).keys().cloned().collect()
    }

    fn blob_url(&self, key: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(MEDIA_PREFIX)
            .and_then(|media| media.join(key))
            .map_err(|e| BackendError::Unavailable(format!("bad blob url for {key}: {e}")))
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Catalog
// =============================================================================

#[async_trait]
impl Catalog for MemoryBackend {
    async fn list_products(&self) -> Result<Vec<Product>, BackendError> {
        Ok(read(&self.products).clone())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, BackendError> {
        Ok(read(&self.products).iter().find(|p| &p.id == id).cloned())
    }

    async fn record_rating(&self, id: &ProductId, rating: Rating) -> Result<(), BackendError> {
        let mut products = write(&self.products);
        let product = products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| BackendError::NotFound(format!("product {id}")))?;
        product.reviews.record(rating);
        Ok(())
    }
}

// =============================================================================
// Reviews
// =============================================================================

#[async_trait]
impl ReviewStore for MemoryBackend {
    async fn list_reviews(
        &self,
        product_id: &ProductId,
        limit: usize,
    ) -> Result<Vec<Review>, BackendError> {
        Ok(lock(&self.reviews).newest_first(product_id, limit))
    }

    #[instrument(skip(self, review), fields(product_id = %review.product_id))]
    async fn create_review(&self, review: NewReview) -> Result<Review, BackendError> {
        let stored = Review {
            id: ReviewId::generate(),
            product_id: review.product_id,
            author_id: review.author_id,
            body: review.body,
            rating: review.rating,
            image_url: review.image_url,
            created_at: Utc::now(),
        };

        let notifications: Vec<(ReviewListener, Vec<Review>)> = {
            let mut table = lock(&self.reviews);
            table.reviews.push(stored.clone());
            table
                .feeds
                .iter()
                .filter(|feed| feed.product_id == stored.product_id)
                .map(|feed| {
                    (
                        feed.listener.clone(),
                        table.newest_first(&feed.product_id, feed.limit),
                    )
                })
                .collect()
        };

        tracing::debug!(listeners = notifications.len(), "Review stored");
        for (listener, snapshot) in notifications {
            listener(&snapshot);
        }

        Ok(stored)
    }

    fn subscribe(
        &self,
        product_id: &ProductId,
        limit: usize,
        listener: ReviewListener,
    ) -> Subscription {
        let (feed_id, snapshot) = {
            let mut table = lock(&self.reviews);
            let feed_id = table.next_feed_id;
            table.next_feed_id += 1;
            table.feeds.push(Feed {
                id: feed_id,
                product_id: product_id.clone(),
                limit,
                listener: listener.clone(),
            });
            (feed_id, table.newest_first(product_id, limit))
        };

        listener(&snapshot);

        let table = Arc::downgrade(&self.reviews);
        Subscription::new(move || {
            if let Some(table) = table.upgrade() {
                lock(&table).feeds.retain(|feed| feed.id != feed_id);
            }
        })
    }
}

// =============================================================================
// Users
// =============================================================================

#[async_trait]
impl UserDirectory for MemoryBackend {
    async fn get_profile(&self, id: &UserId) -> Result<Option<UserProfile>, BackendError> {
        Ok(read(&self.profiles).get(id).cloned())
    }

    async fn put_profile(&self, profile: UserProfile) -> Result<(), BackendError> {
        write(&self.profiles).insert(profile.id.clone(), profile);
        Ok(())
    }
}

// =============================================================================
// Discount codes
// =============================================================================

#[async_trait]
impl DiscountCodes for MemoryBackend {
    async fn find_valid(&self, code: &str) -> Result<Option<DiscountCode>, BackendError> {
        Ok(read(&self.discount_codes)
            .iter()
            .find(|discount| discount.valid && discount.code == code)
            .cloned())
    }
}

// =============================================================================
// Auth
// =============================================================================

fn hash_password(password: &str) -> Result<String, BackendError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| BackendError::Unavailable(format!("password hashing failed: {e}")))
}

fn password_matches(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

#[async_trait]
impl AuthProvider for MemoryBackend {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn create_account(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<UserId, BackendError> {
        if read(&self.accounts).contains_key(email) {
            return Err(BackendError::Conflict(format!("account {email}")));
        }

        // Hash outside the lock; argon2 is deliberately slow.
        let password_hash = hash_password(password.expose_secret())?;
        let id = UserId::generate();

        let mut accounts = write(&self.accounts);
        if accounts.contains_key(email) {
            return Err(BackendError::Conflict(format!("account {email}")));
        }
        accounts.insert(
            email.clone(),
            Account {
                id: id.clone(),
                password_hash,
            },
        );
        Ok(id)
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn verify_password(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<Option<UserId>, BackendError> {
        let account = read(&self.accounts)
            .get(email)
            .map(|account| (account.id.clone(), account.password_hash.clone()));

        Ok(account.and_then(|(id, hash)| {
            password_matches(password.expose_secret(), &hash).then_some(id)
        }))
    }
}

// =============================================================================
// Blobs
// =============================================================================

#[async_trait]
impl BlobStorage for MemoryBackend {
    async fn upload(&self, key: &str, blob: Blob) -> Result<Url, BackendError> {
        let url = self.blob_url(key)?;
        write(&self.blobs).insert(key.to_owned(), blob);
        Ok(url)
    }

    async fn download(&self, key: &str) -> Result<Option<Blob>, BackendError> {
        Ok(read(&self.blobs).get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), BackendError> {
        write(&self.blobs).remove(key);
        Ok(())
    }
}
