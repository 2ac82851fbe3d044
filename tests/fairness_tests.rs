//! Rolling 24-hour budgets: 10 games and 2 promo awards per user, with old
//! entries aging out exactly at the window edge.

use chrono::{Duration, Utc};
use shopfront_bot::constants::{DAILY_GAME_LIMIT, DAILY_PROMO_LIMIT};
use shopfront_bot::services::fairness::FairnessLedger;
use teloxide::types::UserId;

const ALICE: UserId = UserId(11);
const BOB: UserId = UserId(22);

#[test]
fn game_budget_exhausts_at_the_limit() {
    let mut fairness = FairnessLedger::default();
    let now = Utc::now();
    for played in 0..DAILY_GAME_LIMIT {
        assert!(
            fairness.can_start_game_at(ALICE, now),
            "start {played} should still be allowed"
        );
        fairness.record_game_at(ALICE, now);
    }
    assert!(!fairness.can_start_game_at(ALICE, now), "game 11 must be refused");
}

#[test]
fn promo_budget_exhausts_at_the_limit() {
    let mut fairness = FairnessLedger::default();
    let now = Utc::now();
    for _ in 0..DAILY_PROMO_LIMIT {
        assert!(fairness.can_award_promo_at(ALICE, now));
        fairness.record_promo_at(ALICE, now);
    }
    assert!(!fairness.can_award_promo_at(ALICE, now), "third promo must be refused");
}

#[test]
fn entries_age_out_of_the_window() {
    let mut fairness = FairnessLedger::default();
    let start = Utc::now();
    for _ in 0..DAILY_GAME_LIMIT {
        fairness.record_game_at(ALICE, start);
    }
    for _ in 0..DAILY_PROMO_LIMIT {
        fairness.record_promo_at(ALICE, start);
    }
    let just_inside = start + Duration::seconds(86_399);
    assert!(!fairness.can_start_game_at(ALICE, just_inside));
    assert!(!fairness.can_award_promo_at(ALICE, just_inside));

    let past_window = start + Duration::seconds(86_401);
    assert!(
        fairness.can_start_game_at(ALICE, past_window),
        "day-old completions must stop counting"
    );
    assert!(fairness.can_award_promo_at(ALICE, past_window));
}

#[test]
fn a_partial_day_frees_budget_gradually() {
    let mut fairness = FairnessLedger::default();
    let start = Utc::now();
    // Nine games at t0 plus one six hours later: at t0+24h+1s only the
    // later one still counts.
    for _ in 0..(DAILY_GAME_LIMIT - 1) {
        fairness.record_game_at(ALICE, start);
    }
    fairness.record_game_at(ALICE, start + Duration::hours(6));
    assert!(!fairness.can_start_game_at(ALICE, start + Duration::hours(6)));
    assert!(fairness.can_start_game_at(ALICE, start + Duration::seconds(86_401)));
}

#[test]
fn budgets_are_per_user() {
    let mut fairness = FairnessLedger::default();
    let now = Utc::now();
    for _ in 0..DAILY_GAME_LIMIT {
        fairness.record_game_at(ALICE, now);
    }
    assert!(!fairness.can_start_game_at(ALICE, now));
    assert!(fairness.can_start_game_at(BOB, now), "each user gets their own budget");
}

#[test]
fn game_and_promo_budgets_are_independent() {
    let mut fairness = FairnessLedger::default();
    let now = Utc::now();
    for _ in 0..DAILY_PROMO_LIMIT {
        fairness.record_promo_at(ALICE, now);
    }
    assert!(!fairness.can_award_promo_at(ALICE, now));
    assert!(
        fairness.can_start_game_at(ALICE, now),
        "spent promo budget must not block starting games"
    );
}
