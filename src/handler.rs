//! Top-level update routing.
//!
//! Commands, payment events, and promo text go straight to their handlers.
//! Callback tokens are grammar-checked and rate-limited here, then
//! dispatched by family, so the storefront and game handlers only ever see
//! well-formed tokens.

use std::sync::Arc;

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Me;
use teloxide::utils::command::BotCommands;

use crate::commands::{start, tictactoe};
use crate::interactions::{game_handler, ids, shop_handler, util};
use crate::model::AppState;
use crate::payments;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// The payload is empty for a plain `/start` and carries the invite id
    /// when the chat was opened through a game deep link.
    #[command(description = "browse the shop")]
    Start(String),
    #[command(description = "play tic-tac-toe")]
    Tictactoe,
}

/// The dptree schema the dispatcher runs every update through.
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    let messages = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(on_command),
        )
        .branch(
            dptree::filter(|msg: Message| msg.successful_payment().is_some())
                .endpoint(payments::on_successful_payment),
        )
        .branch(
            dptree::filter(|msg: Message| msg.text().is_some())
                .endpoint(shop_handler::handle_promo_text),
        );

    dptree::entry()
        .branch(messages)
        .branch(Update::filter_callback_query().endpoint(on_callback))
        .branch(Update::filter_pre_checkout_query().endpoint(payments::on_pre_checkout))
}

async fn on_command(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
    cmd: Command,
) -> ResponseResult<()> {
    match cmd {
        Command::Start(payload) => start::run(bot, msg, state, payload).await,
        Command::Tictactoe => tictactoe::run::run(bot, msg).await,
    }
}

/// Every button press passes through here: token grammar first, then the
/// per-user throttle, then family dispatch.
async fn on_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
    me: Me,
) -> ResponseResult<()> {
    let Some(token) = q.data.clone() else {
        util::ack(&bot, &q.id).await;
        return Ok(());
    };
    if !ids::is_well_formed(&token) {
        tracing::warn!(target: "router", user_id = q.from.id.0, "malformed callback token rejected");
        util::ack(&bot, &q.id).await;
        return Ok(());
    }
    let allowed = { state.limiter.write().await.allow(q.from.id) };
    if !allowed {
        util::toast(&bot, &q.id, "Slow down! One tap per second.").await;
        return Ok(());
    }

    if token == ids::TTT_SOLO || token == ids::TTT_INVITE || token.starts_with(ids::MOVE_PREFIX) {
        game_handler::handle(bot, q, state, me, token).await
    } else {
        shop_handler::handle(bot, q, state, token).await
    }
}
