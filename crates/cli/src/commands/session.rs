//! Sign-in and sign-out.

use vitrine_core::UserId;
use vitrine_storefront::cart::Reconciliation;
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::copy::{Audience, adapt};
use vitrine_storefront::error::{add_breadcrumb, clear_sentry_user, set_sentry_user};
use vitrine_storefront::state::AppState;

use super::{open_cart, say};
use crate::error::CliError;
use crate::session::StoredSession;

/// Sign `user_id` in and reconcile the device cart with their account cart.
pub async fn login(
    config: StorefrontConfig,
    user_id: String,
    audience: Audience,
) -> Result<(), CliError> {
    let state = AppState::connect(config)?;
    let (mut cart, previous) = open_cart(&state);
    let user_id = UserId::new(user_id);

    let Some(outcome) = cart.sign_in(user_id.clone()).await else {
        say(format!("Already signed in as {user_id}."));
        return Ok(());
    };

    if let Some(previous) = previous {
        tracing::info!(previous = %previous.user_id, "Replacing signed-in user");
    }
    StoredSession::new(user_id.clone(), audience).save(&state.storage());
    set_sentry_user(&user_id);
    add_breadcrumb("session", "Signed in", Some(&[("reconciliation", outcome.label())]));

    say(adapt("Bem-vindo de volta!", audience));
    match outcome {
        Reconciliation::RemoteWins(lines) => {
            say(format!("Loaded your saved cart ({} lines).", lines.len()));
        }
        Reconciliation::LocalPushed { lines } => {
            say(format!("Saved this device's cart to your account ({lines} lines)."));
        }
        Reconciliation::NoOp => {}
        Reconciliation::Failed { pushed, error } => {
            tracing::warn!(pushed, error = %error, "Cart reconciliation failed");
            say("Your account cart could not be reached; keeping this device's cart.");
        }
    }
    Ok(())
}

/// Forget the signed-in user. The device cart is kept.
pub fn logout(config: StorefrontConfig) -> Result<(), CliError> {
    let state = AppState::offline(config)?;
    let storage = state.storage();
    match StoredSession::load(&storage) {
        Some(session) => {
            StoredSession::clear(&storage);
            clear_sentry_user();
            say(format!("Signed out {}.", session.user_id));
        }
        None => say("Nobody is signed in."),
    }
    Ok(())
}
