//! Messaging checkout handoff.

use vitrine_storefront::checkout::CheckoutLink;
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::copy::{Audience, adapt};
use vitrine_storefront::error::{AppError, add_breadcrumb};
use vitrine_storefront::state::AppState;

use super::{open_cart, say, settle};
use crate::error::CliError;

/// Print the order message and link, then clear the cart.
pub async fn run(config: StorefrontConfig, phone: Option<String>) -> Result<(), CliError> {
    let phone = phone
        .or_else(|| config.checkout_phone.clone())
        .ok_or_else(|| {
            AppError::BadRequest(
                "no shop phone configured; set VITRINE_CHECKOUT_PHONE or pass --phone".to_string(),
            )
        })?;
    let currency = config.currency;

    let state = AppState::connect(config)?;
    let (mut cart, session) = open_cart(&state);
    let link = CheckoutLink::build(cart.lines(), &phone, currency).map_err(AppError::from)?;

    add_breadcrumb("checkout", "Checkout link created", None);
    say(&link.message);
    say("");
    say(&link.url);

    let write = cart.clear();
    let audience = session.map_or(Audience::Neutral, |s| s.audience);
    say(adapt("Obrigado pela compra!", audience));
    settle(write).await;
    Ok(())
}
