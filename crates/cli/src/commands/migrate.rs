//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! vitrine migrate
//! ```
//!
//! # Environment Variables
//!
//! - `VITRINE_DATABASE_URL` - `PostgreSQL` connection string for the storefront
//!
//! Migrations live in `crates/storefront/migrations/` and are embedded in the
//! binary.

use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::db;
use vitrine_storefront::state::AppState;

use crate::error::CliError;

/// Run storefront database migrations.
pub async fn storefront(config: StorefrontConfig) -> Result<(), CliError> {
    tracing::info!("Connecting to storefront database...");
    let state = AppState::connect(config)?;

    tracing::info!("Running storefront migrations...");
    db::run_migrations(state.pool()?).await?;

    tracing::info!("Storefront migrations complete!");
    Ok(())
}
