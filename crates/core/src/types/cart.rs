//! Cart line items and the pure list operations behind the cart mutator.
//!
//! A line is identified by `(product_id, selected_size)`. The selected color is
//! carried along but does not take part in matching: adding the same product
//! and size in a different color bumps the existing line, whose color stays the
//! one chosen first.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// One product variant and quantity in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the product at the time the line was created or synced.
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
    pub selected_size: String,
    pub selected_color: String,
}

/// Borrowed uniqueness key of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey<'a> {
    pub product_id: &'a ProductId,
    pub size: &'a str,
}

impl<'a> LineKey<'a> {
    #[must_use]
    pub const fn new(product_id: &'a ProductId, size: &'a str) -> Self {
        Self { product_id, size }
    }
}

impl CartLine {
    /// Create a line with quantity 1.
    #[must_use]
    pub fn new(product: Product, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            product,
            quantity: 1,
            selected_size: size.into(),
            selected_color: color.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> LineKey<'_> {
        LineKey::new(&self.product.id, &self.selected_size)
    }

    #[must_use]
    pub fn matches(&self, key: LineKey<'_>) -> bool {
        self.key() == key
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }

    /// Add one unit of `product` in `size`/`color`.
    ///
    /// Returns the resulting quantity of the affected line.
    pub fn add_to(lines: &mut Vec<Self>, product: &Product, size: &str, color: &str) -> u32 {
        let key = LineKey::new(&product.id, size);
        if let Some(line) = lines.iter_mut().find(|l| l.matches(key)) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }
        lines.push(Self::new(product.clone(), size, color));
        1
    }

    /// Remove the line for `(product_id, size)`.
    ///
    /// Returns `true` if a line was removed.
    pub fn remove_from(lines: &mut Vec<Self>, product_id: &ProductId, size: &str) -> bool {
        let key = LineKey::new(product_id, size);
        let before = lines.len();
        lines.retain(|l| !l.matches(key));
        lines.len() != before
    }

    /// Apply `delta` to the line for `(product_id, size)`, never going below 1.
    ///
    /// Returns the new quantity, or `None` if no such line exists.
    pub fn apply_delta(
        lines: &mut [Self],
        product_id: &ProductId,
        size: &str,
        delta: i32,
    ) -> Option<u32> {
        let key = LineKey::new(product_id, size);
        let line = lines.iter_mut().find(|l| l.matches(key))?;
        let next = i64::from(line.quantity) + i64::from(delta);
        line.quantity = u32::try_from(next.max(1)).unwrap_or(u32::MAX);
        Some(line.quantity)
    }
}

/// Sum of every line total.
#[must_use]
pub fn cart_total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

/// Total number of units across lines.
#[must_use]
pub fn item_count(lines: &[CartLine]) -> u32 {
    lines
        .iter()
        .fold(0_u32, |acc, l| acc.saturating_add(l.quantity))
}
