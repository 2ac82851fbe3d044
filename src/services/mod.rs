//! Process-local stores behind the bot: carts, promo codes, fairness
//! budgets, and the input throttle. Everything here is plain synchronous
//! state; locking lives in [`crate::model::AppState`].

pub mod carts;
pub mod fairness;
pub mod promos;
pub mod rate_limit;
