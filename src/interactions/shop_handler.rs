//! Storefront button flows: category browsing, product cards, cart edits,
//! promo entry, and the pay button.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, InputMedia, InputMediaPhoto, MessageId, ParseMode, UserId};
use url::Url;

use crate::commands::shop::ui;
use crate::constants::{CODE_ALPHABET, PROMO_CODE_LEN, PROMO_DISCOUNT};
use crate::interactions::{ids, util};
use crate::model::AppState;
use crate::payments;

pub async fn handle(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
    token: String,
) -> ResponseResult<()> {
    let Some(msg) = q.message.as_ref() else {
        util::toast(&bot, &q.id, "That menu has expired. Send /start again.").await;
        return Ok(());
    };
    let chat = msg.chat.id;
    let message = msg.id;
    let user = q.from.id;

    if let Some(category) = ids::parse_category(&token, ids::CAT_PREFIX)
        .or_else(|| ids::parse_category(&token, ids::BACK_CAT_PREFIX))
    {
        util::ack(&bot, &q.id).await;
        let (text, markup) = ui::category_view(&state.catalog, category);
        util::show(&bot, chat, message, &text, markup).await;
    } else if token == ids::BACK_CATEGORIES {
        util::ack(&bot, &q.id).await;
        util::show(&bot, chat, message, ui::category_prompt(), ui::category_menu()).await;
    } else if let Some(item_id) = ids::parse_item_id(&token, ids::VIEW_PREFIX) {
        util::ack(&bot, &q.id).await;
        view_product(&bot, &state, chat, message, item_id).await;
    } else if let Some(item_id) = ids::parse_item_id(&token, ids::ADD_PREFIX) {
        if state.catalog.get(item_id).is_none() {
            util::toast(&bot, &q.id, "That item is gone from the catalog.").await;
            return Ok(());
        }
        let added = { state.carts.write().await.add(user, item_id, 1) };
        if added {
            util::toast(&bot, &q.id, "Added to cart ✅").await;
        } else {
            util::toast(&bot, &q.id, "Cart is full (20 items max).").await;
        }
    } else if let Some(item_id) = ids::parse_item_id(&token, ids::INC_PREFIX) {
        if state.catalog.get(item_id).is_none() {
            util::toast(&bot, &q.id, "That item is gone from the catalog.").await;
            return Ok(());
        }
        let added = { state.carts.write().await.increment(user, item_id) };
        if added {
            util::ack(&bot, &q.id).await;
        } else {
            util::toast(&bot, &q.id, "Cart is full (20 items max).").await;
        }
        show_cart(&bot, &state, chat, message, user).await;
    } else if let Some(item_id) = ids::parse_item_id(&token, ids::DEC_PREFIX) {
        {
            state.carts.write().await.decrement(user, item_id);
        }
        util::ack(&bot, &q.id).await;
        show_cart(&bot, &state, chat, message, user).await;
    } else if let Some(item_id) = ids::parse_item_id(&token, ids::REMOVE_PREFIX) {
        {
            state.carts.write().await.remove(user, item_id);
        }
        util::toast(&bot, &q.id, "Removed.").await;
        show_cart(&bot, &state, chat, message, user).await;
    } else if token == ids::CART {
        util::ack(&bot, &q.id).await;
        show_cart(&bot, &state, chat, message, user).await;
    } else if token == ids::PROMO_ENTER {
        {
            state.carts.write().await.set_awaiting_promo(user);
        }
        util::ack(&bot, &q.id).await;
        bot.send_message(chat, "Send your promo code as a message.")
            .await?;
    } else if token == ids::PAY {
        util::ack(&bot, &q.id).await;
        payments::send_cart_invoice(&bot, &state, chat, user).await?;
    } else {
        tracing::debug!(target: "shop", token = %token, "unrecognized storefront token");
        util::ack(&bot, &q.id).await;
    }
    Ok(())
}

/// Product card. Items with a photo try a media edit first and degrade to a
/// plain text card (the previous view may not be editable into media).
async fn view_product(bot: &Bot, state: &AppState, chat: ChatId, message: MessageId, item_id: u32) {
    let Some(item) = state.catalog.get(item_id) else {
        util::show(bot, chat, message, "That item is gone from the catalog.", ui::back_to_categories()).await;
        return;
    };
    let caption = ui::product_caption(item);
    let markup = ui::product_keyboard(item);

    if let Some(photo) = item.photo_url.as_deref()
        && let Ok(url) = photo.parse::<Url>()
    {
        let media = InputMedia::Photo(
            InputMediaPhoto::new(InputFile::url(url))
                .caption(caption.clone())
                .parse_mode(ParseMode::Html),
        );
        match bot
            .edit_message_media(chat, message, media)
            .reply_markup(markup.clone())
            .await
        {
            Ok(_) => return,
            Err(error) => {
                tracing::debug!(target: "shop", %chat, ?error, "media edit failed, falling back to text");
            }
        }
    }
    util::show(bot, chat, message, &caption, markup).await;
}

/// Re-render the cart view in place.
async fn show_cart(bot: &Bot, state: &AppState, chat: ChatId, message: MessageId, user: UserId) {
    let attached = {
        let carts = state.carts.read().await;
        carts.attached_promo(user).map(str::to_owned)
    };
    let promo = match attached {
        Some(code) => state
            .promos
            .read()
            .await
            .is_valid(&code)
            .then_some(code),
        None => None,
    };
    let (text, markup) = {
        let carts = state.carts.read().await;
        ui::cart_view(&state.catalog, &carts, user, promo.as_deref())
    };
    util::show(bot, chat, message, &text, markup).await;
}

/// Plain text while the waiting-for-promo flag is set. A valid code attaches
/// to the cart; anything else gets a corrective reply and the flag stays on
/// so the user can simply retype.
pub async fn handle_promo_text(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let awaiting = { state.carts.read().await.awaiting_promo(user.id) };
    if !awaiting {
        return Ok(());
    }

    let code = text.trim().to_uppercase();
    let well_formed =
        code.len() == PROMO_CODE_LEN && code.bytes().all(|b| CODE_ALPHABET.contains(&b));
    let redeemable = well_formed && { state.promos.read().await.is_valid(&code) };

    if redeemable {
        {
            let mut carts = state.carts.write().await;
            carts.clear_awaiting_promo(user.id);
            carts.attach_promo(user.id, code.clone());
        }
        tracing::info!(target: "shop", user_id = user.id.0, "promo code attached");
        bot.send_message(
            msg.chat.id,
            format!("Code <code>{code}</code> applied: {PROMO_DISCOUNT} ₽ off at checkout."),
        )
        .parse_mode(ParseMode::Html)
        .await?;
    } else {
        bot.send_message(
            msg.chat.id,
            "That code doesn't look valid (or it was already used). Try another one.",
        )
        .await?;
    }
    Ok(())
}
