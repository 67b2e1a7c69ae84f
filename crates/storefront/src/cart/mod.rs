//! Shopping cart service.
//!
//! The device cart is the source of truth. Every mutation updates the
//! in-memory lines, persists them to the [`LocalCartCache`] and, for a
//! signed-in shopper, spawns a best-effort write mirroring the change to the
//! [`RemoteCartStore`]. On sign-in the two carts are merged once, see
//! [`reconcile`].
//!
//! # Example
//!
//! ```rust,ignore
//! let mut cart = CartService::new(FileStore::open(".vitrine")?, Arc::new(PgCartStore::new(pool)));
//! cart.sign_in(UserId::new("u-1")).await;
//! if let Some(write) = cart.add_line(&product, "M", "Navy") {
//!     write.wait().await?;
//! }
//! ```

mod cache;
mod reconcile;
mod remote;

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};
use vitrine_core::{CartLine, Product, ProductId, UserId, cart_total, item_count};

pub use cache::LocalCartCache;
pub use reconcile::{Reconciliation, reconcile};
pub use remote::{
    QuantityChange, RemoteCartItem, RemoteCartStore, RemoteWrite, RemoteWriteError, wait_all,
};

use crate::db::RepositoryError;
use crate::storage::KeyValueStore;

/// A cart change to replay against the remote cart.
#[derive(Debug, Clone)]
enum RemoteOp {
    Add {
        product_id: ProductId,
        size: String,
        color: String,
    },
    Remove {
        product_id: ProductId,
        size: String,
    },
    SetQuantity {
        product_id: ProductId,
        size: String,
        color: String,
        quantity: u32,
    },
    Clear,
}

impl RemoteOp {
    const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::SetQuantity { .. } => "set_quantity",
            Self::Clear => "clear",
        }
    }

    async fn apply<R: RemoteCartStore>(
        &self,
        remote: &R,
        user_id: &UserId,
    ) -> Result<(), RepositoryError> {
        let cart_id = remote.get_or_create_cart(user_id).await?;
        match self {
            Self::Add {
                product_id,
                size,
                color,
            } => {
                remote
                    .upsert_item(cart_id, product_id, size, color, QuantityChange::Increment(1))
                    .await
            }
            Self::Remove { product_id, size } => {
                remote.delete_item(cart_id, product_id, size).await
            }
            Self::SetQuantity {
                product_id,
                size,
                color,
                quantity,
            } => {
                remote
                    .upsert_item(cart_id, product_id, size, color, QuantityChange::Set(*quantity))
                    .await
            }
            Self::Clear => remote.clear(cart_id).await,
        }
    }
}

/// Cart state for one device, optionally tied to a signed-in user.
pub struct CartService<K, R> {
    cache: LocalCartCache<K>,
    remote: Arc<R>,
    lines: Vec<CartLine>,
    user: Option<UserId>,
}

impl<K: KeyValueStore, R: RemoteCartStore> CartService<K, R> {
    /// Create an anonymous cart service, loading the device cart.
    pub fn new(store: K, remote: Arc<R>) -> Self {
        let cache = LocalCartCache::new(store);
        let lines = cache.load();
        Self {
            cache,
            remote,
            lines,
            user: None,
        }
    }

    /// Mark `user` as signed in without reconciling.
    ///
    /// For resuming a session whose sign-in was already reconciled.
    #[must_use]
    pub fn with_session(mut self, user: UserId) -> Self {
        self.user = Some(user);
        self
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        cart_total(&self.lines)
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        item_count(&self.lines)
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    /// React to the identity provider's current user.
    ///
    /// Returns the reconciliation result when this call signed a user in.
    pub async fn on_session_change(&mut self, user: Option<UserId>) -> Option<Reconciliation> {
        match user {
            Some(user) => self.sign_in(user).await,
            None => {
                self.sign_out();
                None
            }
        }
    }

    /// Sign `user` in and reconcile the device cart with their remote cart.
    ///
    /// Does nothing and returns `None` if `user` is already signed in.
    #[instrument(skip(self), fields(user_id = %user))]
    pub async fn sign_in(&mut self, user: UserId) -> Option<Reconciliation> {
        if self.user.as_ref() == Some(&user) {
            debug!("Already signed in, skipping reconciliation");
            return None;
        }

        let outcome = reconcile(self.remote.as_ref(), &user, &self.lines).await;
        if let Reconciliation::RemoteWins(lines) = &outcome {
            self.lines.clone_from(lines);
            self.cache.save(&self.lines);
        }
        self.user = Some(user);
        Some(outcome)
    }

    /// Return to anonymous mode. The device cart is kept.
    pub fn sign_out(&mut self) {
        self.user = None;
    }

    /// Add one unit of `product` in `size`.
    ///
    /// An existing line with the same product and size is incremented and
    /// keeps its original color; `color` only applies to new lines.
    pub fn add_line(&mut self, product: &Product, size: &str, color: &str) -> Option<RemoteWrite> {
        let quantity = CartLine::add_to(&mut self.lines, product, size, color);
        self.cache.save(&self.lines);
        debug!(product_id = %product.id, size, quantity, "Added to cart");

        self.mirror(RemoteOp::Add {
            product_id: product.id.clone(),
            size: size.to_owned(),
            color: color.to_owned(),
        })
    }

    /// Remove the line for `(product_id, size)`.
    pub fn remove_line(&mut self, product_id: &ProductId, size: &str) -> Option<RemoteWrite> {
        if !CartLine::remove_from(&mut self.lines, product_id, size) {
            return None;
        }
        self.cache.save(&self.lines);
        debug!(product_id = %product_id, size, "Removed from cart");

        self.mirror(RemoteOp::Remove {
            product_id: product_id.clone(),
            size: size.to_owned(),
        })
    }

    /// Change a line's quantity by `delta`, never going below 1.
    ///
    /// Lines are only removed by [`Self::remove_line`].
    pub fn set_quantity_delta(
        &mut self,
        product_id: &ProductId,
        size: &str,
        delta: i32,
    ) -> Option<RemoteWrite> {
        let quantity = CartLine::apply_delta(&mut self.lines, product_id, size, delta)?;
        self.cache.save(&self.lines);

        let color = self
            .lines
            .iter()
            .find(|l| &l.product.id == product_id && l.selected_size == size)
            .map(|l| l.selected_color.clone())
            .unwrap_or_default();

        self.mirror(RemoteOp::SetQuantity {
            product_id: product_id.clone(),
            size: size.to_owned(),
            color,
            quantity,
        })
    }

    /// Empty the cart, e.g. after checkout.
    pub fn clear(&mut self) -> Option<RemoteWrite> {
        self.lines.clear();
        self.cache.save(&self.lines);
        self.mirror(RemoteOp::Clear)
    }

    /// Spawn the remote write for `op` when signed in.
    fn mirror(&self, op: RemoteOp) -> Option<RemoteWrite> {
        let user_id = self.user.clone()?;
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(
                operation = op.name(),
                "No async runtime available, skipping remote cart write"
            );
            return None;
        };

        let remote = Arc::clone(&self.remote);
        let operation = op.name();
        let handle = runtime.spawn(async move {
            let result = op.apply(remote.as_ref(), &user_id).await;
            if let Err(e) = &result {
                warn!(operation, user_id = %user_id, error = %e, "Remote cart write failed");
            }
            result
        });

        Some(RemoteWrite::new(operation, handle))
    }
}
