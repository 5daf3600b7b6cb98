//! Shopper state containers.
//!
//! Plain structs with `&mut self` mutators. Handlers load them from the
//! shopper's session, mutate, and store them back (see [`crate::shopper`]),
//! so each one can be unit-tested without an HTTP stack.

pub mod cart;
pub mod orders;
pub mod wishlist;

pub use cart::{Cart, CartLine};
pub use orders::OrderHistory;
pub use wishlist::Wishlist;
