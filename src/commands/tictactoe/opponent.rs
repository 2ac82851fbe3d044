//! The scripted opponent. Its posture is picked per move from the player's
//! remaining promo budget: while a win could still pay out, the house
//! contests; once the budget is spent, it plays to lose.

use rand::Rng;
use rand::prelude::IteratorRandom;

use super::board::{Board, Mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentStrategy {
    /// Complete an own triple when possible, otherwise play a uniformly
    /// random empty cell. Blocking the human is deliberately not attempted.
    Contest,
    /// Stay out of the human's way: leave their winning cells open and avoid
    /// completing an own triple.
    Feed,
}

impl OpponentStrategy {
    pub fn for_verdict(can_award_promo: bool) -> Self {
        if can_award_promo {
            Self::Contest
        } else {
            Self::Feed
        }
    }
}

/// Pick the opponent's cell. `None` only when the board is full.
pub fn choose_cell(board: &Board, strategy: OpponentStrategy, rng: &mut impl Rng) -> Option<usize> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }
    let own_wins = board.winning_cells(Mark::O);
    match strategy {
        OpponentStrategy::Contest => {
            if let Some(&cell) = own_wins.first() {
                return Some(cell);
            }
            empty.into_iter().choose(rng)
        }
        OpponentStrategy::Feed => {
            let human_wins = board.winning_cells(Mark::X);
            let generous: Vec<usize> = empty
                .iter()
                .copied()
                .filter(|c| !human_wins.contains(c) && !own_wins.contains(c))
                .collect();
            if !generous.is_empty() {
                return generous.into_iter().choose(rng);
            }
            // Every free cell either hands us a win or steals the human's;
            // at least dodge our own winning cells if we can.
            let harmless: Vec<usize> = empty
                .iter()
                .copied()
                .filter(|c| !own_wins.contains(c))
                .collect();
            if !harmless.is_empty() {
                return harmless.into_iter().choose(rng);
            }
            empty.into_iter().choose(rng)
        }
    }
}
