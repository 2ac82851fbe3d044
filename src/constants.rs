// Central limits and fixed values for the storefront and the mini-game.

use teloxide::types::Currency;

/// Maximum total units a single user's cart may hold.
pub const CART_MAX_UNITS: u32 = 20;
/// Flat discount applied at checkout while a valid promo code is attached.
pub const PROMO_DISCOUNT: i64 = 200;
/// Completed games allowed per user inside the rolling window.
pub const DAILY_GAME_LIMIT: usize = 10;
/// Promo codes awarded per user inside the rolling window.
pub const DAILY_PROMO_LIMIT: usize = 2;
/// Length of the rolling fairness window, in seconds.
pub const FAIRNESS_WINDOW_SECS: i64 = 86_400;
/// Minimum gap between two accepted button presses per user.
pub const RATE_LIMIT_MS: u64 = 1_000;

/// Alphabet for promo codes and invite ids (no 0/O/1/I/L lookalikes).
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
pub const PROMO_CODE_LEN: usize = 8;
pub const INVITE_ID_LEN: usize = 8;

/// Settlement currency expected on incoming payments.
pub const CURRENCY: Currency = Currency::RUB;
/// ISO 4217 code for [`CURRENCY`], sent with outgoing invoices.
pub const CURRENCY_CODE: &str = "RUB";
/// Catalog file read once at startup.
pub const CATALOG_PATH: &str = "products.json";
