//! One-time merge of the device cart with the signed-in user's remote cart.
//!
//! Rules, evaluated once per sign-in:
//! 1. remote cart has lines: remote wins and replaces the device cart;
//! 2. remote cart is empty and the device cart is not: every device line is
//!    pushed to the remote cart, one write at a time;
//! 3. both empty: nothing happens.
//!
//! A push that fails midway stops there. Lines already written stay in the
//! remote cart; nothing is retried or cleaned up.

use tracing::{info, instrument, warn};
use vitrine_core::{CartLine, UserId};

use super::remote::{QuantityChange, RemoteCartStore};
use crate::db::RepositoryError;

/// What a reconciliation did.
#[derive(Debug)]
pub enum Reconciliation {
    /// The remote cart replaced the device cart with these lines.
    RemoteWins(Vec<CartLine>),
    /// The device cart was copied to the empty remote cart.
    LocalPushed { lines: usize },
    /// Both carts were empty.
    NoOp,
    /// The remote backend failed; the device cart was left untouched.
    Failed {
        /// Device lines written before the failure.
        pushed: usize,
        error: RepositoryError,
    },
}

impl Reconciliation {
    /// Short label for logs and CLI output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::RemoteWins(_) => "remote_wins",
            Self::LocalPushed { .. } => "local_pushed",
            Self::NoOp => "no_op",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Reconcile `local` against the remote cart of `user_id`.
#[instrument(skip(remote, local), fields(user_id = %user_id, local_lines = local.len()))]
pub async fn reconcile<R: RemoteCartStore>(
    remote: &R,
    user_id: &UserId,
    local: &[CartLine],
) -> Reconciliation {
    let cart_id = match remote.get_or_create_cart(user_id).await {
        Ok(id) => id,
        Err(error) => {
            warn!(error = %error, "Cart reconciliation failed to open remote cart");
            return Reconciliation::Failed { pushed: 0, error };
        }
    };

    let remote_items = match remote.list_items(cart_id).await {
        Ok(items) => items,
        Err(error) => {
            warn!(cart_id = %cart_id, error = %error, "Cart reconciliation failed to list remote cart");
            return Reconciliation::Failed { pushed: 0, error };
        }
    };

    if !remote_items.is_empty() {
        info!(cart_id = %cart_id, lines = remote_items.len(), "Remote cart wins");
        return Reconciliation::RemoteWins(remote_items.into_iter().map(CartLine::from).collect());
    }

    if local.is_empty() {
        return Reconciliation::NoOp;
    }

    for (pushed, line) in local.iter().enumerate() {
        let result = remote
            .upsert_item(
                cart_id,
                &line.product.id,
                &line.selected_size,
                &line.selected_color,
                QuantityChange::Set(line.quantity),
            )
            .await;

        if let Err(error) = result {
            warn!(
                cart_id = %cart_id,
                product_id = %line.product.id,
                pushed,
                error = %error,
                "Cart reconciliation stopped while pushing device cart"
            );
            return Reconciliation::Failed { pushed, error };
        }
    }

    info!(cart_id = %cart_id, lines = local.len(), "Device cart pushed to remote");
    Reconciliation::LocalPushed { lines: local.len() }
}
