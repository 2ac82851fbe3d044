//! Per-user throttle on button presses.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use teloxide::types::UserId;

use crate::constants::RATE_LIMIT_MS;

#[derive(Debug, Default)]
pub struct RateLimiter {
    last_accepted: HashMap<UserId, Instant>,
}

impl RateLimiter {
    pub fn allow(&mut self, user: UserId) -> bool {
        self.allow_at(user, Instant::now())
    }

    /// Accept and record the press unless the previous accepted press was
    /// under the minimum gap ago. Rejected presses do not move the
    /// timestamp, so a burst unblocks as soon as the gap from the last
    /// accepted press has passed.
    pub fn allow_at(&mut self, user: UserId, now: Instant) -> bool {
        if let Some(last) = self.last_accepted.get(&user)
            && now.saturating_duration_since(*last) < Duration::from_millis(RATE_LIMIT_MS)
        {
            return false;
        }
        self.last_accepted.insert(user, now);
        true
    }
}
