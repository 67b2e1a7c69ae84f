//! Device-local cart cache.

use tracing::warn;
use vitrine_core::CartLine;

use crate::storage::{KeyValueStore, keys};

/// Cart lines persisted in device storage under [`keys::CART`].
#[derive(Debug, Clone)]
pub struct LocalCartCache<K> {
    store: K,
}

impl<K: KeyValueStore> LocalCartCache<K> {
    pub const fn new(store: K) -> Self {
        Self { store }
    }

    /// The persisted lines; empty when nothing is stored or the entry is unreadable.
    pub fn load(&self) -> Vec<CartLine> {
        let Some(raw) = self.store.get(keys::CART) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Discarding unreadable cart cache");
            Vec::new()
        })
    }

    /// Persist the full line list.
    pub fn save(&self, lines: &[CartLine]) {
        match serde_json::to_string(lines) {
            Ok(raw) => self.store.set(keys::CART, &raw),
            Err(e) => warn!(error = %e, "Failed to serialize cart cache"),
        }
    }

    pub const fn store(&self) -> &K {
        &self.store
    }
}
