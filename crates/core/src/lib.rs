//! NepFit Core - Shared domain types.
//!
//! This crate provides common types used across all NepFit components:
//! - `storefront` - Shopper-facing API (catalog, cart, wishlist, checkout)
//! - `cli` - Command-line tools for inspecting seed catalogs
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no backend access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, ratings, and
//!   checkout/profile enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
