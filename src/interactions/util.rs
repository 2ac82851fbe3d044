//! Shared interaction helpers: callback acks and safe in-place edits.

use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId, ParseMode};
use teloxide::{ApiError, RequestError};

/// Acknowledge a callback query, ignoring duplicate/late errors.
pub async fn ack(bot: &Bot, query_id: &str) {
    if let Err(error) = bot.answer_callback_query(query_id.to_owned()).await {
        tracing::debug!(target: "ui.answer", ?error, "callback answer failed (already acknowledged?)");
    }
}

/// Acknowledge with a short toast shown to the presser only.
pub async fn toast(bot: &Bot, query_id: &str, text: &str) {
    if let Err(error) = bot
        .answer_callback_query(query_id.to_owned())
        .text(text)
        .await
    {
        tracing::debug!(target: "ui.answer", ?error, "callback answer failed (already acknowledged?)");
    }
}

/// Edit a message in place. A "message is not modified" response counts as
/// success; any other failure is logged and reported so callers can fall
/// back to a fresh send.
pub async fn edit_text(
    bot: &Bot,
    chat: ChatId,
    message: MessageId,
    text: &str,
    markup: Option<InlineKeyboardMarkup>,
) -> bool {
    let mut request = bot
        .edit_message_text(chat, message, text)
        .parse_mode(ParseMode::Html);
    if let Some(markup) = markup {
        request = request.reply_markup(markup);
    }
    match request.await {
        Ok(_) => true,
        Err(RequestError::Api(ApiError::MessageNotModified)) => true,
        Err(error) => {
            tracing::warn!(target: "ui.edit", %chat, ?error, "edit_message_text failed");
            false
        }
    }
}

/// Edit in place, or send a fresh message when the edit is impossible (for
/// example when the previous view was a media message).
pub async fn show(
    bot: &Bot,
    chat: ChatId,
    message: MessageId,
    text: &str,
    markup: InlineKeyboardMarkup,
) {
    if edit_text(bot, chat, message, text, Some(markup.clone())).await {
        return;
    }
    if let Err(error) = bot
        .send_message(chat, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(markup)
        .await
    {
        tracing::warn!(target: "ui.send", %chat, ?error, "fallback send failed");
    }
}
