//! Vitrine storefront library.
//!
//! Device-side services for the storefront: the shopping cart with its
//! local cache and remote mirror, inventory gating, wishlist, layout
//! preference and the messaging checkout handoff.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod copy;
pub mod db;
pub mod error;
pub mod inventory;
pub mod preferences;
pub mod state;
pub mod storage;
pub mod wishlist;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test_support;
