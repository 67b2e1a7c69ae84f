//! Vitrine Core - Shared domain types.
//!
//! This crate provides the types used across all Vitrine components:
//! - `storefront` - Cart, wishlist, inventory and checkout services
//! - `cli` - Command-line front end acting as the shopper's device
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no async runtime. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products, cart lines and inventory rows

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
