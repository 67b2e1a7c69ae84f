//! Per-variant inventory rows and the stock lookup used to gate purchases.
//!
//! Stock semantics are asymmetric:
//! - a product with no inventory rows at all is treated as fully in stock,
//!   so products without inventory tracking stay sellable;
//! - once any row exists for a product, a `(size, color)` combination without
//!   a row is out of stock, the same as a row with quantity 0.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Stock count for one `(product, color, size)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub product_id: ProductId,
    pub color: String,
    pub size: String,
    pub quantity: u32,
}

impl InventoryRecord {
    #[must_use]
    pub fn new(
        product_id: ProductId,
        color: impl Into<String>,
        size: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            product_id,
            color: color.into(),
            size: size.into(),
            quantity,
        }
    }

    fn is_variant(&self, size: &str, color: &str) -> bool {
        self.size == size && self.color == color
    }
}

/// Stock lookup over the inventory rows loaded for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockLookup {
    records: Vec<InventoryRecord>,
    unavailable: bool,
}

impl StockLookup {
    /// Build a lookup from the rows loaded for a single product.
    #[must_use]
    pub const fn new(records: Vec<InventoryRecord>) -> Self {
        Self {
            records,
            unavailable: false,
        }
    }

    /// A lookup for a product whose inventory could not be loaded.
    ///
    /// Every variant reports no stock.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            records: Vec::new(),
            unavailable: true,
        }
    }

    /// Whether the rows could not be loaded.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        self.unavailable
    }

    /// Whether the `(size, color)` variant can be purchased.
    #[must_use]
    pub fn has_stock(&self, size: &str, color: &str) -> bool {
        if self.unavailable {
            return false;
        }
        if self.records.is_empty() {
            return true;
        }
        self.records
            .iter()
            .find(|r| r.is_variant(size, color))
            .is_some_and(|r| r.quantity > 0)
    }

    /// Whether `color` has stock in at least one of `sizes`.
    #[must_use]
    pub fn color_has_any_stock<S: AsRef<str>>(&self, color: &str, sizes: &[S]) -> bool {
        sizes.iter().any(|size| self.has_stock(size.as_ref(), color))
    }

    /// Units on hand for the variant, if a row exists.
    #[must_use]
    pub fn quantity(&self, size: &str, color: &str) -> Option<u32> {
        self.records
            .iter()
            .find(|r| r.is_variant(size, color))
            .map(|r| r.quantity)
    }
}
