//! Game rendering: the board keyboard and every game text.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::html;

use super::board::{Board, Mark};
use crate::constants::PROMO_DISCOUNT;
use crate::interactions::ids;

const EMPTY_CELL: &str = "·";

/// 3x3 grid of callback buttons. Every cell carries its move token; taken
/// cells show the mark and are simply rejected when pressed.
pub fn board_keyboard(board: &Board) -> InlineKeyboardMarkup {
    let rows = (0..3).map(|row| {
        (0..3)
            .map(|col| {
                let cell = row * 3 + col;
                let label = board.get(cell).map(Mark::glyph).unwrap_or(EMPTY_CELL);
                InlineKeyboardButton::callback(label, format!("{}{cell}", ids::MOVE_PREFIX))
            })
            .collect::<Vec<_>>()
    });
    InlineKeyboardMarkup::new(rows)
}

/// Final solo view: the frozen board plus a rematch button.
pub fn finished_solo_keyboard(board: &Board) -> InlineKeyboardMarkup {
    let mut markup = board_keyboard(board);
    markup.inline_keyboard.push(vec![InlineKeyboardButton::callback(
        "🔁 Play again",
        ids::TTT_SOLO,
    )]);
    markup
}

pub fn menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![InlineKeyboardButton::callback(
            "🎮 Play vs the house",
            ids::TTT_SOLO,
        )],
        vec![InlineKeyboardButton::callback(
            "🤝 Challenge a friend",
            ids::TTT_INVITE,
        )],
    ])
}

pub fn menu_text() -> String {
    format!(
        "🎯 <b>Tic-tac-toe</b>\n\nBeat the house and win a promo code worth {PROMO_DISCOUNT} ₽ \
         off your next order, or challenge a friend to a duel."
    )
}

pub fn solo_intro_text() -> String {
    format!(
        "You are ✖️ and move first. Win to earn a {PROMO_DISCOUNT} ₽ promo code.\n\nYour move."
    )
}

pub fn solo_turn_text() -> &'static str {
    "You are ✖️.\n\nYour move."
}

pub fn solo_win_text(code: Option<&str>) -> String {
    match code {
        Some(code) => format!(
            "🎉 You win! Your promo code: <code>{code}</code>\nApply it in the cart for \
             {PROMO_DISCOUNT} ₽ off."
        ),
        None => "🎉 You win! You've already earned today's promo codes, so no code this time. \
                 Come back tomorrow."
            .to_owned(),
    }
}

pub fn solo_loss_text() -> &'static str {
    "🏠 The house takes this one. Better luck next time!"
}

pub fn draw_text() -> &'static str {
    "🤝 It's a draw."
}

pub fn duel_header(x_name: &str, o_name: &str) -> String {
    format!(
        "⚔️ {} ✖️ vs {} ⭕",
        html::escape(x_name),
        html::escape(o_name)
    )
}

pub fn your_move_line() -> &'static str {
    "Your move."
}

pub fn waiting_line(holder: &str) -> String {
    format!("Waiting for {}…", html::escape(holder))
}

pub fn duel_win_line(winner: &str) -> String {
    format!("🏆 {} wins!", html::escape(winner))
}

pub fn invite_text(link: &str) -> String {
    format!(
        "🤝 Send this link to a friend:\n{link}\n\nWhoever opens it plays ⭕. You are ✖️ and \
         move first. Your board appears here as soon as they join."
    )
}

pub fn duel_promo_text(code: &str) -> String {
    format!(
        "🎁 Victory bonus! Your promo code: <code>{code}</code>\nApply it in the cart for \
         {PROMO_DISCOUNT} ₽ off."
    )
}
