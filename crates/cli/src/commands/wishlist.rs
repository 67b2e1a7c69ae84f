//! Wishlist commands.

use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::state::AppState;
use vitrine_storefront::wishlist::Wishlist;

use super::{find_product, say};
use crate::error::CliError;
use crate::session::StoredSession;

/// Print the wishlist of the signed-in shopper, or the guest wishlist.
pub fn list(config: StorefrontConfig) -> Result<(), CliError> {
    let state = AppState::offline(config)?;
    let storage = state.storage();
    let session = StoredSession::load(&storage);
    let wishlist = Wishlist::load(storage, session.as_ref().map(|s| &s.user_id));

    if wishlist.items().is_empty() {
        say("Your wishlist is empty.");
    }
    for id in wishlist.items() {
        say(id);
    }
    Ok(())
}

/// Add `slug` to the wishlist, or remove it if already there.
pub async fn toggle(config: StorefrontConfig, slug: &str) -> Result<(), CliError> {
    let state = AppState::connect(config)?;
    let product = find_product(&state, slug).await?;
    let storage = state.storage();
    let session = StoredSession::load(&storage);
    let mut wishlist = Wishlist::load(storage, session.as_ref().map(|s| &s.user_id));

    if wishlist.toggle(&product.id) {
        say(format!("Added {} to your wishlist.", product.name));
    } else {
        say(format!("Removed {} from your wishlist.", product.name));
    }
    Ok(())
}
