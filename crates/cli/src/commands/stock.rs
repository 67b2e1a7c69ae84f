//! Stock display for a product.

use vitrine_core::{Product, StockLookup};
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::state::AppState;

use super::{find_product, say};
use crate::error::{CliError, bad_request};

/// Print availability of `slug`, optionally narrowed to one size or color.
pub async fn show(
    config: StorefrontConfig,
    slug: &str,
    size: Option<&str>,
    color: Option<&str>,
) -> Result<(), CliError> {
    let state = AppState::connect(config)?;
    let product = find_product(&state, slug).await?;

    if let Some(size) = size
        && !product.offers_size(size)
    {
        return Err(bad_request(format!("{} is not offered in size {size}", product.name)));
    }
    if let Some(color) = color
        && !product.offers_color(color)
    {
        return Err(bad_request(format!("{} is not offered in {color}", product.name)));
    }

    let lookup = state.inventory()?.lookup(&product.id).await;
    if lookup.is_unavailable() {
        say("Stock could not be checked right now; this product cannot be added to the cart.");
        return Ok(());
    }

    say(format!("{} ({})", product.name, product.slug));
    for line in stock_table(&product, &lookup, size, color) {
        say(line);
    }
    Ok(())
}

fn stock_table(
    product: &Product,
    lookup: &StockLookup,
    size: Option<&str>,
    color: Option<&str>,
) -> Vec<String> {
    let sizes: Vec<&str> = match size {
        Some(size) => vec![size],
        None => product.sizes.iter().map(String::as_str).collect(),
    };

    product
        .colors
        .iter()
        .filter(|c| color.is_none_or(|wanted| c.name == wanted))
        .map(|c| {
            if !lookup.color_has_any_stock(&c.name, &sizes) {
                return format!("  {}: sold out", c.name);
            }
            let cells: Vec<String> = sizes
                .iter()
                .map(|s| {
                    let mark = if lookup.has_stock(s, &c.name) { "ok" } else { "--" };
                    format!("{s}:{mark}")
                })
                .collect();
            format!("  {}: {}", c.name, cells.join(" "))
        })
        .collect()
}
