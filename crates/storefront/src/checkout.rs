//! Checkout handoff to a messaging app.
//!
//! There is no payment step. Checkout turns the cart into a plain-text order
//! message and a `wa.me` link that opens a chat with the shop with the
//! message pre-filled. Once the link is handed to the shopper the cart is
//! cleared by the caller.

use thiserror::Error;
use vitrine_core::{CartLine, CurrencyCode, Price, cart_total};

const MESSAGING_BASE_URL: &str = "https://wa.me";

/// Errors that prevent building a checkout link.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid shop phone number: {0}")]
    InvalidPhone(String),
}

/// A ready-to-open order handoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLink {
    /// The order text sent to the shop.
    pub message: String,
    /// Messaging link with the message pre-filled.
    pub url: String,
}

impl CheckoutLink {
    /// Build the order message and link for `lines`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] for an empty cart and
    /// [`CheckoutError::InvalidPhone`] if `phone` has no digits or contains
    /// characters other than digits, `+`, spaces, dashes and parentheses.
    pub fn build(
        lines: &[CartLine],
        phone: &str,
        currency: CurrencyCode,
    ) -> Result<Self, CheckoutError> {
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let phone = normalize_phone(phone)?;
        let message = order_message(lines, currency);
        let url = format!(
            "{MESSAGING_BASE_URL}/{phone}?text={}",
            urlencoding::encode(&message)
        );
        Ok(Self { message, url })
    }
}

fn normalize_phone(raw: &str) -> Result<String, CheckoutError> {
    let mut digits = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '0'..='9' => digits.push(c),
            '+' | ' ' | '-' | '(' | ')' => {}
            _ => return Err(CheckoutError::InvalidPhone(raw.to_owned())),
        }
    }
    if digits.is_empty() {
        return Err(CheckoutError::InvalidPhone(raw.to_owned()));
    }
    Ok(digits)
}

fn order_message(lines: &[CartLine], currency: CurrencyCode) -> String {
    let mut message = String::from("Olá! Gostaria de finalizar meu pedido:\n\n");
    for line in lines {
        message.push_str(&format!(
            "- {}x {} (Tam. {}, {}): {}\n",
            line.quantity,
            line.product.name,
            line.selected_size,
            line.selected_color,
            Price::new(line.line_total(), currency),
        ));
    }
    message.push_str(&format!(
        "\nTotal: {}",
        Price::new(cart_total(lines), currency)
    ));
    message
}
