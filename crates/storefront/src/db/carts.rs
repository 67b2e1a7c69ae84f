//! Remote cart queries.
//!
//! One cart per user; lines are unique per `(cart_id, product_id, size)`.
//! Upserts keep the color stored when the line was first inserted.

use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;
use vitrine_core::{CartId, ColorOption, Product, ProductId, UserId};

use super::products::PRODUCT_COLUMNS;
use super::{RepositoryError, quantity_from_db, quantity_to_db};
use crate::cart::{QuantityChange, RemoteCartItem, RemoteCartStore};

/// A cart line joined with its product.
#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    id: ProductId,
    slug: String,
    name: String,
    category: String,
    price: Decimal,
    images: Vec<String>,
    description: String,
    details: String,
    composition: String,
    sizes: Vec<String>,
    colors: Json<Vec<ColorOption>>,
    size: String,
    color: String,
    quantity: i32,
}

impl TryFrom<CartItemRow> for RemoteCartItem {
    type Error = RepositoryError;

    fn try_from(row: CartItemRow) -> Result<Self, Self::Error> {
        let quantity = quantity_from_db(row.quantity, "storefront.cart_item")?;
        Ok(Self {
            product: Product {
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
            },
            size: row.size,
            color: row.color,
            quantity,
        })
    }
}

/// Remote cart backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgCartStore {
    pool: PgPool,
}

impl PgCartStore {
    /// Create a new cart store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RemoteCartStore for PgCartStore {
    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn get_or_create_cart(&self, user_id: &UserId) -> Result<CartId, RepositoryError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO storefront.cart (id, user_id) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING id",
        )
        .bind(CartId::generate().as_uuid())
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(CartId::new(id))
    }

    #[instrument(skip(self), fields(cart_id = %cart_id))]
    async fn list_items(&self, cart_id: CartId) -> Result<Vec<RemoteCartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(&format!(
            "SELECT {PRODUCT_COLUMNS}, ci.size, ci.color, ci.quantity \
             FROM storefront.cart_item ci \
             JOIN storefront.product p ON p.id = ci.product_id \
             WHERE ci.cart_id = $1 \
             ORDER BY ci.created_at, ci.product_id, ci.size"
        ))
        .bind(cart_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RemoteCartItem::try_from).collect()
    }

    #[instrument(skip(self), fields(cart_id = %cart_id, product_id = %product_id))]
    async fn upsert_item(
        &self,
        cart_id: CartId,
        product_id: &ProductId,
        size: &str,
        color: &str,
        change: QuantityChange,
    ) -> Result<(), RepositoryError> {
        let (sql, amount) = match change {
            QuantityChange::Increment(delta) => (
                "INSERT INTO storefront.cart_item (cart_id, product_id, size, color, quantity) \
                 VALUES ($1, $2, $3, $4, GREATEST($5, 1)) \
                 ON CONFLICT (cart_id, product_id, size) DO UPDATE SET \
                     quantity   = GREATEST(storefront.cart_item.quantity + $5, 1), \
                     updated_at = NOW()",
                delta,
            ),
            QuantityChange::Set(quantity) => (
                "INSERT INTO storefront.cart_item (cart_id, product_id, size, color, quantity) \
                 VALUES ($1, $2, $3, $4, GREATEST($5, 1)) \
                 ON CONFLICT (cart_id, product_id, size) DO UPDATE SET \
                     quantity   = EXCLUDED.quantity, \
                     updated_at = NOW()",
                quantity_to_db(quantity),
            ),
        };

        sqlx::query(sql)
            .bind(cart_id.as_uuid())
            .bind(product_id)
            .bind(size)
            .bind(color)
            .bind(amount)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    #[instrument(skip(self), fields(cart_id = %cart_id, product_id = %product_id))]
    async fn delete_item(
        &self,
        cart_id: CartId,
        product_id: &ProductId,
        size: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "DELETE FROM storefront.cart_item \
             WHERE cart_id = $1 AND product_id = $2 AND size = $3",
        )
        .bind(cart_id.as_uuid())
        .bind(product_id)
        .bind(size)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[instrument(skip(self), fields(cart_id = %cart_id))]
    async fn clear(&self, cart_id: CartId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM storefront.cart_item WHERE cart_id = $1")
            .bind(cart_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
