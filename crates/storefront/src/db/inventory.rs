//! Inventory row queries.

use sqlx::PgPool;
use tracing::instrument;
use vitrine_core::{InventoryRecord, ProductId};

use super::{RepositoryError, quantity_from_db};
use crate::inventory::InventoryStore;

#[derive(Debug, sqlx::FromRow)]
struct InventoryRow {
    product_id: ProductId,
    color: String,
    size: String,
    quantity: i32,
}

impl TryFrom<InventoryRow> for InventoryRecord {
    type Error = RepositoryError;

    fn try_from(row: InventoryRow) -> Result<Self, Self::Error> {
        let quantity = quantity_from_db(row.quantity, "storefront.inventory")?;
        Ok(Self::new(row.product_id, row.color, row.size, quantity))
    }
}

/// Inventory reads backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgInventoryStore {
    pool: PgPool,
}

impl PgInventoryStore {
    /// Create a new inventory store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl InventoryStore for PgInventoryStore {
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn records_for(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<InventoryRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            "SELECT product_id, color, size, quantity \
             FROM storefront.inventory \
             WHERE product_id = $1 \
             ORDER BY color, size",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(InventoryRecord::try_from).collect()
    }
}
