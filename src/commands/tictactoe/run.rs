//! `/tictactoe` command entry: shows the game menu.

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use super::ui;

pub async fn run(bot: Bot, msg: Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, ui::menu_text())
        .parse_mode(ParseMode::Html)
        .reply_markup(ui::menu_keyboard())
        .await?;
    Ok(())
}
