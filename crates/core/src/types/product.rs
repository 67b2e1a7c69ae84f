//! Catalog product types.
//!
//! Products are owned by the back office; the storefront only reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A named color swatch offered for a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorOption {
    /// Display name, also used as the inventory key (e.g. "Navy").
    pub name: String,
    /// CSS hex value for the swatch (e.g. "#1f2a44").
    pub hex: String,
}

impl ColorOption {
    /// Create a new color option.
    #[must_use]
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// URL key.
    pub slug: String,
    pub name: String,
    pub category: String,
    /// Unit price in the store currency's standard unit.
    pub price: Decimal,
    /// Image references (URLs or storage paths).
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub composition: String,
    /// Size labels in display order (e.g. `["P", "M", "G"]`).
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<ColorOption>,
}

impl Product {
    /// Whether `size` is one of this product's size labels.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Whether `color` names one of this product's color options.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c.name == color)
    }

    /// The first image reference, used as the cart thumbnail.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
