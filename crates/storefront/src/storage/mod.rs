//! Device-local key-value storage.
//!
//! The storefront keeps the cart, wishlist and UI preferences on the
//! shopper's device. Storage is synchronous and never fails from the
//! caller's point of view: write errors are logged and reads of missing or
//! unreadable entries return `None`.
//!
//! # Keys
//!
//! Every key starts with [`keys::PREFIX`]. Per-user entries append the user
//! ID, or [`keys::GUEST`] when nobody is signed in. See [`keys`].

mod file;
mod memory;

use std::sync::Arc;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Synchronous string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Delete `key` if present.
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// Storage keys for device-local data.
pub mod keys {
    use vitrine_core::UserId;

    /// Prefix shared by every key this crate writes.
    pub const PREFIX: &str = "vitrine";

    /// Scope used for per-user entries when nobody is signed in.
    pub const GUEST: &str = "guest";

    /// Key for the cart line list.
    pub const CART: &str = "vitrine:cart";

    /// Key for the listing layout preference.
    pub const LAYOUT: &str = "vitrine:layout";

    /// Key for the signed-in session marker.
    pub const SESSION: &str = "vitrine:session";

    /// Key for the wishlist of `user`, or the guest wishlist.
    #[must_use]
    pub fn wishlist(user: Option<&UserId>) -> String {
        scoped("wishlist", user)
    }

    fn scoped(name: &str, user: Option<&UserId>) -> String {
        let owner = user.map_or(GUEST, UserId::as_str);
        format!("{PREFIX}:{name}:{owner}")
    }
}
