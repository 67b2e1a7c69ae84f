//! Remote cart backend contract and best-effort write handles.
//!
//! The remote cart is a projection of the device cart for signed-in
//! shoppers. Writes to it are spawned in the background; the caller gets a
//! [`RemoteWrite`] it may await or drop. Failures are logged where they happen
//! and are never retried or rolled back, so the remote cart can drift from
//! the local one.

use std::future::Future;

use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use vitrine_core::{CartId, CartLine, Product, ProductId, UserId};

use crate::db::RepositoryError;

/// How a remote line's quantity changes on upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Add `n` (may be negative) to the existing quantity, inserting the
    /// line if absent. The stored quantity never drops below 1.
    Increment(i32),
    /// Overwrite the quantity, inserting the line if absent.
    Set(u32),
}

/// A remote cart line enriched with the current product record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCartItem {
    pub product: Product,
    pub size: String,
    pub color: String,
    pub quantity: u32,
}

impl From<RemoteCartItem> for CartLine {
    fn from(item: RemoteCartItem) -> Self {
        Self {
            product: item.product,
            quantity: item.quantity.max(1),
            selected_size: item.size,
            selected_color: item.color,
        }
    }
}

/// Per-user cart persisted by a remote backend.
pub trait RemoteCartStore: Send + Sync + 'static {
    /// Return the user's cart, creating it if needed. Idempotent.
    fn get_or_create_cart(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<CartId, RepositoryError>> + Send;

    /// List the cart's lines, oldest first, with product details.
    fn list_items(
        &self,
        cart_id: CartId,
    ) -> impl Future<Output = Result<Vec<RemoteCartItem>, RepositoryError>> + Send;

    /// Insert or update the line for `(product_id, size)`.
    ///
    /// `color` is stored only when the line is inserted.
    fn upsert_item(
        &self,
        cart_id: CartId,
        product_id: &ProductId,
        size: &str,
        color: &str,
        change: QuantityChange,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete the line for `(product_id, size)` if present.
    fn delete_item(
        &self,
        cart_id: CartId,
        product_id: &ProductId,
        size: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete every line of the cart.
    fn clear(&self, cart_id: CartId) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// A device without a configured backend.
///
/// `None` rejects every call as unavailable, so a signed-in shopper's
/// mirrored writes fail and are logged while the device cart keeps working.
impl<R: RemoteCartStore> RemoteCartStore for Option<R> {
    async fn get_or_create_cart(&self, user_id: &UserId) -> Result<CartId, RepositoryError> {
        match self {
            Some(remote) => remote.get_or_create_cart(user_id).await,
            None => Err(not_configured()),
        }
    }

    async fn list_items(&self, cart_id: CartId) -> Result<Vec<RemoteCartItem>, RepositoryError> {
        match self {
            Some(remote) => remote.list_items(cart_id).await,
            None => Err(not_configured()),
        }
    }

    async fn upsert_item(
        &self,
        cart_id: CartId,
        product_id: &ProductId,
        size: &str,
        color: &str,
        change: QuantityChange,
    ) -> Result<(), RepositoryError> {
        match self {
            Some(remote) => {
                remote
                    .upsert_item(cart_id, product_id, size, color, change)
                    .await
            }
            None => Err(not_configured()),
        }
    }

    async fn delete_item(
        &self,
        cart_id: CartId,
        product_id: &ProductId,
        size: &str,
    ) -> Result<(), RepositoryError> {
        match self {
            Some(remote) => remote.delete_item(cart_id, product_id, size).await,
            None => Err(not_configured()),
        }
    }

    async fn clear(&self, cart_id: CartId) -> Result<(), RepositoryError> {
        match self {
            Some(remote) => remote.clear(cart_id).await,
            None => Err(not_configured()),
        }
    }
}

fn not_configured() -> RepositoryError {
    RepositoryError::Unavailable("no remote cart configured".to_owned())
}

/// Failure of a background remote write, as seen by a caller that awaits it.
#[derive(Debug, Error)]
pub enum RemoteWriteError {
    #[error("remote cart write failed: {0}")]
    Store(#[from] RepositoryError),

    #[error("remote cart write task aborted: {0}")]
    Aborted(#[from] JoinError),
}

/// Handle to a spawned remote cart write.
///
/// Dropping the handle detaches the write; it still runs to completion.
#[derive(Debug)]
pub struct RemoteWrite {
    operation: &'static str,
    handle: JoinHandle<Result<(), RepositoryError>>,
}

impl RemoteWrite {
    pub(crate) const fn new(
        operation: &'static str,
        handle: JoinHandle<Result<(), RepositoryError>>,
    ) -> Self {
        Self { operation, handle }
    }

    /// Name of the mirrored cart operation (`add`, `remove`, ...).
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// Wait for the write to finish.
    ///
    /// # Errors
    ///
    /// Returns the backend error (already logged by the task) or the task's
    /// join error if it panicked.
    pub async fn wait(self) -> Result<(), RemoteWriteError> {
        self.handle.await??;
        Ok(())
    }
}

/// Await every handle, returning how many writes failed.
pub async fn wait_all(writes: impl IntoIterator<Item = RemoteWrite>) -> usize {
    let mut failed = 0;
    for write in writes {
        if write.wait().await.is_err() {
            failed += 1;
        }
    }
    failed
}
