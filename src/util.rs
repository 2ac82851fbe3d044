//! Misc small utilities shared across modules.

use rand::Rng;

use crate::constants::CODE_ALPHABET;

/// Random identifier drawn from the fixed code alphabet.
pub fn random_code(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Render a whole-unit price for display, e.g. `1290 ₽`.
pub fn fmt_price(amount: i64) -> String {
    format!("{amount} ₽")
}
