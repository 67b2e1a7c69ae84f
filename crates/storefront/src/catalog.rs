//! Read-only access to catalog products.

use std::future::Future;

use vitrine_core::{Product, ProductId};

use crate::db::RepositoryError;

/// Source of catalog products.
pub trait CatalogStore: Send + Sync {
    /// Look up a product by ID.
    fn product_by_id(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Option<Product>, RepositoryError>> + Send;

    /// Look up a product by its URL slug.
    fn product_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<Product>, RepositoryError>> + Send;
}
