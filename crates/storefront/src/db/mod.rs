//! Database operations for the storefront `PostgreSQL` backend.
//!
//! # Schema: `storefront`
//!
//! The back office owns the catalog and inventory; the storefront only reads
//! them. Carts belong to signed-in shoppers and are written here.
//!
//! ## Tables
//!
//! - `product` - Catalog products (sizes, colors, images)
//! - `inventory` - Stock per `(product, color, size)`
//! - `cart` - One remote cart per user
//! - `cart_item` - Cart lines, unique per `(cart, product, size)`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p vitrine-cli -- migrate
//! ```

pub mod carts;
pub mod inventory;
pub mod products;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;

pub use carts::PgCartStore;
pub use inventory::PgInventoryStore;
pub use products::PgCatalogStore;

/// Embedded storefront migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Backend could not be reached.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Create a lazily connecting `PostgreSQL` connection pool.
///
/// No connection is opened until the first query, so an unreachable
/// database surfaces as a failed query instead of a failed startup.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string cannot be parsed.
pub fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(database_url.expose_secret())?;
    Ok(PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(options))
}

/// Apply pending storefront migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the history is inconsistent.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Convert a stored `INTEGER` quantity into a cart/inventory quantity.
pub(crate) fn quantity_from_db(value: i32, context: &str) -> Result<u32, RepositoryError> {
    u32::try_from(value).map_err(|_| {
        RepositoryError::DataCorruption(format!("negative quantity {value} in {context}"))
    })
}

/// Convert a cart/inventory quantity into a stored `INTEGER`.
pub(crate) fn quantity_to_db(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
