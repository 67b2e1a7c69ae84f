//! Core types for Vitrine.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod inventory;
pub mod preference;
pub mod price;
pub mod product;

pub use cart::{CartLine, LineKey, cart_total, item_count};
pub use id::*;
pub use inventory::{InventoryRecord, StockLookup};
pub use preference::{LayoutPreference, ParseLayoutError};
pub use price::{CurrencyCode, Price};
pub use product::{ColorOption, Product};
