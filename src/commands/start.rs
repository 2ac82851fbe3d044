//! `/start`: the storefront greeting, or an invite join when the command
//! payload carries a `ttt_<id>` deep link.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::commands::shop::ui;
use crate::interactions::{game_handler, ids};
use crate::model::AppState;

pub async fn run(bot: Bot, msg: Message, state: Arc<AppState>, payload: String) -> ResponseResult<()> {
    if let Some(invite_id) = ids::parse_deep_link(payload.trim()) {
        let Some(joiner) = msg.from() else {
            return Ok(());
        };
        return game_handler::join_game(&bot, &state, joiner, msg.chat.id, invite_id).await;
    }

    bot.send_message(msg.chat.id, ui::welcome_text())
        .parse_mode(ParseMode::Html)
        .reply_markup(ui::category_menu())
        .await?;
    Ok(())
}
