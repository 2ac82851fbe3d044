//! Shared application state.
//!
//! One `Arc<AppState>` is injected into the dispatcher's dependency map and
//! handed to every handler. Each mutable store guards itself with its own
//! lock; handlers compute under a lock, drop it, and only then talk to the
//! platform, so no lock is ever held across an outbound call.

use teloxide::types::ChatId;
use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::commands::tictactoe::session::GameStore;
use crate::services::carts::CartLedger;
use crate::services::fairness::FairnessLedger;
use crate::services::promos::PromoRegistry;
use crate::services::rate_limit::RateLimiter;

/// The central, shared state of the bot.
pub struct AppState {
    /// Read-only product catalog, loaded once at startup.
    pub catalog: Catalog,
    pub carts: RwLock<CartLedger>,
    pub promos: RwLock<PromoRegistry>,
    pub fairness: RwLock<FairnessLedger>,
    pub limiter: RwLock<RateLimiter>,
    pub games: RwLock<GameStore>,
    /// Operator chat notified about settled orders. `ChatId(0)` disables it.
    pub admin_chat: ChatId,
    /// Payment-provider credential passed through on invoices. Empty means
    /// payments are disabled.
    pub provider_token: String,
}

impl AppState {
    pub fn new(catalog: Catalog, admin_chat: ChatId, provider_token: String) -> Self {
        Self {
            catalog,
            carts: RwLock::new(CartLedger::default()),
            promos: RwLock::new(PromoRegistry::default()),
            fairness: RwLock::new(FairnessLedger::default()),
            limiter: RwLock::new(RateLimiter::default()),
            games: RwLock::new(GameStore::default()),
            admin_chat,
            provider_token,
        }
    }
}
