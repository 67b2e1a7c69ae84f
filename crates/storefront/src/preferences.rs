//! Persisted UI preferences.

use tracing::debug;
use vitrine_core::LayoutPreference;

use crate::storage::{KeyValueStore, keys};

/// Stored listing layout, or the default when unset or unrecognized.
pub fn load_layout(store: &impl KeyValueStore) -> LayoutPreference {
    store
        .get(keys::LAYOUT)
        .and_then(|raw| {
            raw.parse()
                .inspect_err(|e| debug!(error = %e, "Ignoring stored layout"))
                .ok()
        })
        .unwrap_or_default()
}

pub fn save_layout(store: &impl KeyValueStore, layout: LayoutPreference) {
    store.set(keys::LAYOUT, layout.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_layout_defaults_to_grid() {
        let store = MemoryStore::new();
        assert_eq!(load_layout(&store), LayoutPreference::Grid);

        store.set(keys::LAYOUT, "carousel");
        assert_eq!(load_layout(&store), LayoutPreference::Grid);
    }

    #[test]
    fn test_saved_layout_is_loaded() {
        let store = MemoryStore::new();
        save_layout(&store, LayoutPreference::List);
        assert_eq!(load_layout(&store), LayoutPreference::List);
    }
}
