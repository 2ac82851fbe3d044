//! Rolling 24-hour budgets for games played and promo codes won.
//!
//! Timestamps are pruned lazily at query time, so a user who maxed out
//! yesterday regains budget exactly as their old entries age past the
//! window. The `_at` variants take an explicit clock for tests.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use teloxide::types::UserId;

use crate::constants::{DAILY_GAME_LIMIT, DAILY_PROMO_LIMIT, FAIRNESS_WINDOW_SECS};

#[derive(Debug, Default)]
pub struct FairnessLedger {
    games: HashMap<UserId, Vec<DateTime<Utc>>>,
    promos: HashMap<UserId, Vec<DateTime<Utc>>>,
}

fn recent(
    map: &mut HashMap<UserId, Vec<DateTime<Utc>>>,
    user: UserId,
    now: DateTime<Utc>,
) -> usize {
    let Some(entries) = map.get_mut(&user) else {
        return 0;
    };
    let cutoff = now - Duration::seconds(FAIRNESS_WINDOW_SECS);
    entries.retain(|t| *t > cutoff);
    entries.len()
}

impl FairnessLedger {
    pub fn can_start_game(&mut self, user: UserId) -> bool {
        self.can_start_game_at(user, Utc::now())
    }

    pub fn can_start_game_at(&mut self, user: UserId, now: DateTime<Utc>) -> bool {
        recent(&mut self.games, user, now) < DAILY_GAME_LIMIT
    }

    pub fn can_award_promo(&mut self, user: UserId) -> bool {
        self.can_award_promo_at(user, Utc::now())
    }

    pub fn can_award_promo_at(&mut self, user: UserId, now: DateTime<Utc>) -> bool {
        recent(&mut self.promos, user, now) < DAILY_PROMO_LIMIT
    }

    pub fn record_game(&mut self, user: UserId) {
        self.record_game_at(user, Utc::now());
    }

    pub fn record_game_at(&mut self, user: UserId, at: DateTime<Utc>) {
        self.games.entry(user).or_default().push(at);
    }

    pub fn record_promo(&mut self, user: UserId) {
        self.record_promo_at(user, Utc::now());
    }

    pub fn record_promo_at(&mut self, user: UserId, at: DateTime<Utc>) {
        self.promos.entry(user).or_default().push(at);
    }
}
