//! Registry of outstanding promo codes.
//!
//! Codes are bearer tokens: they are not bound to the user who won them, so
//! anyone holding the string may redeem it. A code is valid from issue until
//! the first checkout that consumes it.

use std::collections::HashSet;

use rand::Rng;

use crate::constants::PROMO_CODE_LEN;
use crate::util::random_code;

#[derive(Debug, Default)]
pub struct PromoRegistry {
    valid: HashSet<String>,
}

impl PromoRegistry {
    /// Issue a fresh code, re-rolling on the off chance of a collision with
    /// an outstanding one.
    pub fn issue(&mut self, rng: &mut impl Rng) -> String {
        loop {
            let code = random_code(rng, PROMO_CODE_LEN);
            if self.valid.insert(code.clone()) {
                return code;
            }
        }
    }

    pub fn is_valid(&self, code: &str) -> bool {
        self.valid.contains(code)
    }

    /// Spend a code. Consuming an unknown or already-spent code is a no-op.
    pub fn consume(&mut self, code: &str) {
        self.valid.remove(code);
    }

    pub fn outstanding(&self) -> usize {
        self.valid.len()
    }
}
