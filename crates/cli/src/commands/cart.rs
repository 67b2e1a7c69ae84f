//! Cart commands.
//!
//! Adding a variant is gated on stock: the size and color must be offered by
//! the product and the inventory must report the variant as purchasable.

use vitrine_core::{CartLine, CurrencyCode, Price, ProductId, cart_total, item_count};
use vitrine_storefront::cart::LocalCartCache;
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::error::add_breadcrumb;
use vitrine_storefront::state::AppState;

use super::{find_product, open_cart, say, settle};
use crate::error::{CliError, bad_request, not_found};

/// Print the device cart. Works without a database.
pub fn show(config: StorefrontConfig) -> Result<(), CliError> {
    let currency = config.currency;
    let state = AppState::offline(config)?;
    let lines = LocalCartCache::new(state.storage()).load();
    print_lines(&lines, currency);
    Ok(())
}

fn print_lines(lines: &[CartLine], currency: CurrencyCode) {
    if lines.is_empty() {
        say("Your cart is empty.");
        return;
    }
    for line in lines {
        say(format!(
            "{:>3} x {} ({}) size {} / {}  {}",
            line.quantity,
            line.product.name,
            line.product.slug,
            line.selected_size,
            line.selected_color,
            Price::new(line.line_total(), currency),
        ));
    }
    say(format!(
        "{} items, total {}",
        item_count(lines),
        Price::new(cart_total(lines), currency)
    ));
}

/// Add one unit of `(slug, size, color)`.
pub async fn add(
    config: StorefrontConfig,
    slug: &str,
    size: &str,
    color: &str,
) -> Result<(), CliError> {
    let state = AppState::connect(config)?;
    let product = find_product(&state, slug).await?;

    if !product.offers_size(size) {
        return Err(bad_request(format!("{} is not offered in size {size}", product.name)));
    }
    if !product.offers_color(color) {
        return Err(bad_request(format!("{} is not offered in {color}", product.name)));
    }
    if !state.inventory()?.has_stock(&product, size, color).await {
        return Err(bad_request(format!(
            "{} in size {size}, {color} is out of stock",
            product.name
        )));
    }

    let (mut cart, _) = open_cart(&state);
    let write = cart.add_line(&product, size, color);
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product.id.as_str()), ("size", size)]),
    );
    say(format!("Added {} (size {size}) to your cart.", product.name));
    settle(write).await;
    Ok(())
}

/// Remove the `(slug, size)` line.
pub async fn remove(config: StorefrontConfig, slug: &str, size: &str) -> Result<(), CliError> {
    let state = AppState::connect(config)?;
    let (mut cart, _) = open_cart(&state);
    let product_id = line_product_id(cart.lines(), slug, size)?;

    let write = cart.remove_line(&product_id, size);
    say(format!("Removed {slug} (size {size})."));
    settle(write).await;
    Ok(())
}

/// Change the quantity of the `(slug, size)` line by `delta`.
pub async fn change_quantity(
    config: StorefrontConfig,
    slug: &str,
    size: &str,
    delta: i32,
) -> Result<(), CliError> {
    let state = AppState::connect(config)?;
    let (mut cart, _) = open_cart(&state);
    let product_id = line_product_id(cart.lines(), slug, size)?;

    let write = cart.set_quantity_delta(&product_id, size, delta);
    if let Some(line) = cart
        .lines()
        .iter()
        .find(|l| l.product.id == product_id && l.selected_size == size)
    {
        say(format!("{slug} (size {size}) quantity is now {}.", line.quantity));
    }
    settle(write).await;
    Ok(())
}

/// Remove every line.
pub async fn clear(config: StorefrontConfig) -> Result<(), CliError> {
    let state = AppState::connect(config)?;
    let (mut cart, _) = open_cart(&state);
    let write = cart.clear();
    say("Your cart is empty.");
    settle(write).await;
    Ok(())
}

/// Cart lines embed their product, so slugs resolve without the catalog.
fn line_product_id(
    lines: &[CartLine],
    slug: &str,
    size: &str,
) -> Result<ProductId, CliError> {
    lines
        .iter()
        .find(|l| l.product.slug == slug && l.selected_size == size)
        .map(|l| l.product.id.clone())
        .ok_or_else(|| not_found(format!("cart line {slug} (size {size})")))
}
