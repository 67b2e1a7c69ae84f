//! Listing layout preference.

use vitrine_core::LayoutPreference;
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::preferences::{load_layout, save_layout};
use vitrine_storefront::state::AppState;

use super::say;
use crate::error::CliError;

/// Print the stored layout, or store `layout`.
pub fn run(config: StorefrontConfig, layout: Option<LayoutPreference>) -> Result<(), CliError> {
    let state = AppState::offline(config)?;
    let storage = state.storage();
    match layout {
        Some(layout) => {
            save_layout(&storage, layout);
            say(format!("Layout set to {layout}."));
        }
        None => say(load_layout(&storage)),
    }
    Ok(())
}
