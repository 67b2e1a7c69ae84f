//! Signed-in session marker kept in device storage.
//!
//! Each CLI invocation is a fresh process, so the identity of the signed-in
//! shopper is persisted under [`keys::SESSION`] and restored on start.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use vitrine_core::UserId;
use vitrine_storefront::copy::Audience;
use vitrine_storefront::storage::{KeyValueStore, keys};

/// The shopper signed in on this device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub user_id: UserId,
    #[serde(default)]
    pub audience: Audience,
    pub signed_in_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(user_id: UserId, audience: Audience) -> Self {
        Self {
            user_id,
            audience,
            signed_in_at: Utc::now(),
        }
    }

    /// The stored session, if any; unreadable entries count as signed out.
    pub fn load(store: &impl KeyValueStore) -> Option<Self> {
        let raw = store.get(keys::SESSION)?;
        serde_json::from_str(&raw)
            .inspect_err(|e| warn!(error = %e, "Discarding unreadable session"))
            .ok()
    }

    pub fn save(&self, store: &impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(raw) => store.set(keys::SESSION, &raw),
            Err(e) => warn!(error = %e, "Failed to serialize session"),
        }
    }

    pub fn clear(store: &impl KeyValueStore) {
        store.remove(keys::SESSION);
    }
}

#[cfg(test)]
mod tests {
    use vitrine_storefront::storage::MemoryStore;

    use super::*;

    #[test]
    fn test_session_round_trips_through_storage() {
        let store = MemoryStore::new();
        assert!(StoredSession::load(&store).is_none());

        let session = StoredSession::new(UserId::new("u-1"), Audience::Feminine);
        session.save(&store);
        assert_eq!(StoredSession::load(&store), Some(session));

        StoredSession::clear(&store);
        assert!(StoredSession::load(&store).is_none());
    }

    #[test]
    fn test_unreadable_session_counts_as_signed_out() {
        let store = MemoryStore::new();
        store.set(keys::SESSION, "{\"user_id\":");
        assert!(StoredSession::load(&store).is_none());
    }
}
