//! Core types for NepFit.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod payment;
pub mod plan;
pub mod price;
pub mod rating;

pub use category::CategoryFilter;
pub use email::{Email, EmailError};
pub use id::*;
pub use payment::PaymentMethod;
pub use plan::SubscriptionPlan;
pub use price::{CurrencyCode, Price, round_money};
pub use rating::{Rating, RatingError};
