//! Gendered storefront copy.
//!
//! Greetings and account messages are written once and adapted to the
//! shopper's preferred form of address by swapping word pairs from
//! [`WORD_PAIRS`]. Matching is whole-word and case-insensitive; the
//! replacement keeps the original's capitalization.

use serde::{Deserialize, Serialize};

/// `(masculine, feminine)` word pairs, lowercase.
pub const WORD_PAIRS: &[(&str, &str)] = &[
    ("bem-vindo", "bem-vinda"),
    ("obrigado", "obrigada"),
    ("querido", "querida"),
    ("cadastrado", "cadastrada"),
    ("conectado", "conectada"),
    ("convidado", "convidada"),
    ("amigo", "amiga"),
    ("dele", "dela"),
    ("ele", "ela"),
];

/// Form of address used for storefront copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Feminine,
    Masculine,
    #[default]
    Neutral,
}

/// Rewrite `text` for `audience`.
#[must_use]
pub fn adapt(text: &str, audience: Audience) -> String {
    if audience == Audience::Neutral {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len());
    let mut word = String::new();
    for c in text.chars() {
        if c.is_alphanumeric() || c == '-' {
            word.push(c);
        } else {
            flush_word(&mut out, &mut word, audience);
            out.push(c);
        }
    }
    flush_word(&mut out, &mut word, audience);
    out
}

fn flush_word(out: &mut String, word: &mut String, audience: Audience) {
    if word.is_empty() {
        return;
    }
    match counterpart(&word.to_lowercase(), audience) {
        Some(target) => out.push_str(&match_case(word, target)),
        None => out.push_str(word),
    }
    word.clear();
}

fn counterpart(lower: &str, audience: Audience) -> Option<&'static str> {
    WORD_PAIRS.iter().find_map(|&(masculine, feminine)| match audience {
        Audience::Feminine if lower == masculine => Some(feminine),
        Audience::Masculine if lower == feminine => Some(masculine),
        _ => None,
    })
}

fn match_case(original: &str, target: &str) -> String {
    let letters: Vec<char> = original.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        return target.to_uppercase();
    }
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = target.chars();
        return chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        });
    }
    target.to_owned()
}
