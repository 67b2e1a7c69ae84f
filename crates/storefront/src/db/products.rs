//! Catalog product queries.

use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;
use vitrine_core::{ColorOption, Product, ProductId};

use super::RepositoryError;
use crate::catalog::CatalogStore;

/// Columns selected for a product, shared by every product query.
pub(crate) const PRODUCT_COLUMNS: &str = "p.id, p.slug, p.name, p.category, p.price, p.images, \
     p.description, p.details, p.composition, p.sizes, p.colors";

/// A row from the `storefront.product` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub images: Vec<String>,
    pub description: String,
    pub details: String,
    pub composition: String,
    pub sizes: Vec<String>,
    pub colors: Json<Vec<ColorOption>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            name: row.name,
            category: row.category,
            price: row.price,
            images: row.images,
            description: row.description,
            details: row.details,
            composition: row.composition,
            sizes: row.sizes,
            colors: row.colors.0,
        }
    }
}

/// Catalog reads backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Create a new catalog store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for PgCatalogStore {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn product_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM storefront.product p WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM storefront.product p WHERE p.slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }
}
