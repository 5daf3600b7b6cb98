//! HTTP route handlers for storefront.
//!
//! All bodies are JSON.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Health check
//!
//! # Products
//! GET  /products?q=&category=&sort=   - Search, filter and sort
//! GET  /products/categories           - Category picker options
//! GET  /products/{id}                 - Product detail
//! GET  /products/{id}/reviews         - Newest reviews
//! POST /products/{id}/reviews         - Submit a review (auth)
//! GET  /products/{id}/reviews/live    - Live reviews (SSE)
//!
//! # Cart
//! GET  /cart                          - Cart contents
//! POST /cart/add                      - Add product
//! POST /cart/update                   - Set line quantity
//! POST /cart/remove                   - Remove line
//!
//! # Wishlist
//! GET  /wishlist                      - Saved products
//! POST /wishlist/add                  - Save product
//! POST /wishlist/remove               - Unsave product
//!
//! # Checkout (requires auth)
//! GET  /checkout                      - Progress and cart
//! POST /checkout/payment              - Select payment method
//! POST /checkout/card                 - Enter card details
//! POST /checkout/confirm              - Place order
//!
//! # Account (requires auth)
//! GET  /account                       - Profile
//! POST /account                       - Update profile
//! POST /account/plan                  - Select subscription plan
//! GET  /account/orders                - Orders placed this session
//!
//! # Auth
//! POST /auth/signup                   - Create account and sign in
//! POST /auth/login                    - Sign in
//! POST /auth/logout                   - Sign out
//! GET  /auth/state                    - Signed in or not
//!
//! # Media
//! GET  /media/{*key}                  - Review images
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod media;
pub mod products;
pub mod reviews;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use nepfit_core::ProductId;

use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Look a product up or fail with 404.
async fn find_product(state: &AppState, id: &ProductId) -> Result<Product> {
    state
        .backend()
        .catalog
        .get_product(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/categories", get(products::categories))
        .route("/{id}", get(products::show))
        .route("/{id}/reviews", get(reviews::list).post(reviews::submit))
        .route("/{id}/reviews/live", get(reviews::live))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/payment", post(checkout::select_payment))
        .route("/card", post(checkout::enter_card))
        .route("/confirm", post(checkout::confirm))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::profile).post(account::update_profile))
        .route("/plan", post(account::select_plan))
        .route("/orders", get(account::orders))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/state", get(auth::state))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/checkout", checkout_routes())
        .nest("/account", account_routes())
        .nest("/auth", auth_routes())
        .route("/media/{*key}", get(media::download))
}
