//! Device-local wishlist, scoped per signed-in user or guest.

use tracing::warn;
use vitrine_core::{ProductId, UserId};

use crate::storage::{KeyValueStore, keys};

/// Wishlisted product IDs for one owner, in the order they were added.
pub struct Wishlist<K> {
    store: K,
    key: String,
    items: Vec<ProductId>,
}

impl<K: KeyValueStore> Wishlist<K> {
    /// Load the wishlist of `user`, or the guest wishlist.
    pub fn load(store: K, user: Option<&UserId>) -> Self {
        let key = keys::wishlist(user);
        let items = store
            .get(&key)
            .and_then(|raw| {
                serde_json::from_str(&raw)
                    .inspect_err(|e| warn!(key = %key, error = %e, "Discarding unreadable wishlist"))
                    .ok()
            })
            .unwrap_or_default();
        Self { store, key, items }
    }

    #[must_use]
    pub fn items(&self) -> &[ProductId] {
        &self.items
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.contains(product_id)
    }

    /// Add the product if absent, remove it otherwise.
    ///
    /// Returns whether the product is wishlisted afterwards.
    pub fn toggle(&mut self, product_id: &ProductId) -> bool {
        let added = if self.contains(product_id) {
            self.items.retain(|id| id != product_id);
            false
        } else {
            self.items.push(product_id.clone());
            true
        };
        self.save();
        added
    }

    /// Remove the product if present.
    pub fn remove(&mut self, product_id: &ProductId) {
        if self.contains(product_id) {
            self.items.retain(|id| id != product_id);
            self.save();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.store.remove(&self.key);
    }

    fn save(&self) {
        match serde_json::to_string(&self.items) {
            Ok(raw) => self.store.set(&self.key, &raw),
            Err(e) => warn!(key = %self.key, error = %e, "Failed to serialize wishlist"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut wishlist = Wishlist::load(MemoryStore::new(), None);
        let id = ProductId::new("p1");

        assert!(wishlist.toggle(&id));
        assert!(wishlist.contains(&id));
        assert!(!wishlist.toggle(&id));
        assert!(wishlist.items().is_empty());
    }

    #[test]
    fn test_wishlists_are_scoped_per_user() {
        let store = Arc::new(MemoryStore::new());
        let alice = UserId::new("alice");

        Wishlist::load(Arc::clone(&store), Some(&alice)).toggle(&ProductId::new("p1"));
        Wishlist::load(Arc::clone(&store), None).toggle(&ProductId::new("p2"));

        let reloaded = Wishlist::load(Arc::clone(&store), Some(&alice));
        assert_eq!(reloaded.items(), &[ProductId::new("p1")]);
        let guest = Wishlist::load(store, None);
        assert_eq!(guest.items(), &[ProductId::new("p2")]);
    }

    #[test]
    fn test_unreadable_entry_loads_empty_and_clear_removes_key() {
        let store = Arc::new(MemoryStore::new());
        store.set(&keys::wishlist(None), "oops");

        let mut wishlist = Wishlist::load(Arc::clone(&store), None);
        assert!(wishlist.items().is_empty());

        wishlist.toggle(&ProductId::new("p1"));
        wishlist.clear();
        assert!(store.get(&keys::wishlist(None)).is_none());
    }
}
