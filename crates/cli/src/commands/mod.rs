//! Command implementations.

pub mod cart;
pub mod checkout;
pub mod layout;
pub mod migrate;
pub mod session;
pub mod stock;
pub mod wishlist;

use std::fmt::Display;
use std::sync::Arc;

use vitrine_core::Product;
use vitrine_storefront::cart::{CartService, RemoteWrite};
use vitrine_storefront::catalog::CatalogStore;
use vitrine_storefront::db::PgCartStore;
use vitrine_storefront::state::AppState;
use vitrine_storefront::storage::FileStore;

use crate::error::{CliError, not_found};
use crate::session::StoredSession;

type DeviceCart = CartService<Arc<FileStore>, Option<PgCartStore>>;

/// Print one line of command output.
#[allow(clippy::print_stdout)]
fn say(line: impl Display) {
    println!("{line}");
}

/// Load the device cart and resume the stored session, if any.
fn open_cart(state: &AppState) -> (DeviceCart, Option<StoredSession>) {
    let cart = state.cart();
    let session = StoredSession::load(&state.storage());
    let cart = match &session {
        Some(session) => cart.with_session(session.user_id.clone()),
        None => cart,
    };
    (cart, session)
}

/// Look up a catalog product by slug.
async fn find_product(state: &AppState, slug: &str) -> Result<Product, CliError> {
    state
        .catalog()?
        .product_by_slug(slug)
        .await?
        .ok_or_else(|| not_found(format!("product {slug}")))
}

/// Wait for a mirrored cart write so the process does not exit before it lands.
///
/// A failed write leaves the device cart changed; the shopper is told the
/// account cart is out of sync.
async fn settle(write: Option<RemoteWrite>) {
    let Some(write) = write else {
        return;
    };
    let operation = write.operation();
    if let Err(e) = write.wait().await {
        tracing::debug!(operation, error = %e, "Remote write did not land");
        say("Saved on this device; your account cart could not be updated.");
    }
}
