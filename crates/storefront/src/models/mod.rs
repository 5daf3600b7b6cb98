//! Domain models for the storefront.
//!
//! Documents read from and written to the backend collections, plus the
//! small types kept in the shopper's session.

pub mod discount;
pub mod order;
pub mod product;
pub mod review;
pub mod session;
pub mod user;

pub use discount::DiscountCode;
pub use order::{CardSummary, Order, OrderTotals, ShippingDetails};
pub use product::{Product, ReviewSummary};
pub use review::{NewReview, Review, ReviewImage};
pub use session::{CurrentUser, keys as session_keys};
pub use user::{ProfileUpdate, UserProfile};
