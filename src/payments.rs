//! Invoices, pre-checkout approval, and checkout verification.
//!
//! Nothing is reserved when an invoice goes out; the ledger is the source
//! of truth and every settled payment is re-verified against it before the
//! order is finalized.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{ChatId, Currency, LabeledPrice, PreCheckoutQuery, UserId};

use crate::catalog::Catalog;
use crate::constants::{CURRENCY, CURRENCY_CODE};
use crate::model::AppState;
use crate::services::carts::CartLedger;
use crate::services::promos::PromoRegistry;
use crate::util::fmt_price;

/// Why a settled payment was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    CurrencyMismatch { paid: Currency },
    AmountMismatch { expected_minor: i64, paid_minor: i64 },
}

/// Verify a settled payment against the current cart and finalize the
/// order: the cart is emptied and the attached promo code consumed. On any
/// mismatch nothing changes, so the cart survives for support to inspect.
/// Returns the charged total in whole currency units.
pub fn settle_payment(
    carts: &mut CartLedger,
    promos: &mut PromoRegistry,
    catalog: &Catalog,
    user: UserId,
    paid_currency: Currency,
    paid_minor: i64,
) -> Result<i64, CheckoutError> {
    if paid_currency != CURRENCY {
        return Err(CheckoutError::CurrencyMismatch {
            paid: paid_currency,
        });
    }
    let attached = carts.attached_promo(user).map(str::to_owned);
    let promo_applied = attached
        .as_deref()
        .map(|code| promos.is_valid(code))
        .unwrap_or(false);
    let expected_minor = carts
        .total(catalog, user, promo_applied)
        .saturating_mul(100);
    if paid_minor != expected_minor {
        return Err(CheckoutError::AmountMismatch {
            expected_minor,
            paid_minor,
        });
    }
    if promo_applied
        && let Some(code) = attached.as_deref()
    {
        promos.consume(code);
    }
    carts.clear(user);
    Ok(expected_minor / 100)
}

/// Invoice total in minor units, if it fits the platform's `i32` amount
/// field.
pub fn invoice_amount(total: i64) -> Option<i32> {
    total
        .checked_mul(100)
        .and_then(|minor| i32::try_from(minor).ok())
}

/// Send an invoice for the user's cart. The amount is the discounted total
/// in minor units; the payload ties the invoice back to the buyer.
pub async fn send_cart_invoice(
    bot: &Bot,
    state: &AppState,
    chat: ChatId,
    user: UserId,
) -> ResponseResult<()> {
    let attached = {
        let carts = state.carts.read().await;
        carts.attached_promo(user).map(str::to_owned)
    };
    let promo_applied = match attached.as_deref() {
        Some(code) => state.promos.read().await.is_valid(code),
        None => false,
    };
    let (is_empty, total) = {
        let carts = state.carts.read().await;
        (
            carts.is_empty(user),
            carts.total(&state.catalog, user, promo_applied),
        )
    };

    if is_empty {
        bot.send_message(chat, "🛒 Your cart is empty.").await?;
        return Ok(());
    }
    if total <= 0 {
        bot.send_message(chat, "There's nothing to charge for this cart.")
            .await?;
        return Ok(());
    }
    if state.provider_token.is_empty() {
        tracing::warn!(target: "payments", "provider token is empty, refusing to send an invoice");
        bot.send_message(chat, "Payments aren't set up on this bot yet.")
            .await?;
        return Ok(());
    }

    let Some(minor_total) = invoice_amount(total) else {
        tracing::error!(target: "payments", user_id = user.0, total, "cart total exceeds the invoice amount range");
        bot.send_message(
            chat,
            "This cart's total is too large to invoice. Remove some items first.",
        )
        .await?;
        return Ok(());
    };

    let prices = vec![LabeledPrice::new("Total", minor_total)];
    bot.send_invoice(
        chat,
        "Shopfront order",
        "Payment for the items in your cart",
        format!("order_{}", user.0),
        state.provider_token.clone(),
        CURRENCY_CODE,
        prices,
    )
    .await?;
    tracing::info!(target: "payments", user_id = user.0, total, "invoice sent");
    Ok(())
}

/// Telegram requires an answer within 10 seconds. Stock is never held, so
/// every pre-checkout is approved; verification happens on settlement.
pub async fn on_pre_checkout(bot: Bot, q: PreCheckoutQuery) -> ResponseResult<()> {
    bot.answer_pre_checkout_query(q.id, true).await?;
    Ok(())
}

/// A payment has settled: verify it, finalize the order, and notify both
/// the buyer and the operator chat.
pub async fn on_successful_payment(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let Some(payment) = msg.successful_payment() else {
        return Ok(());
    };
    let Some(user) = msg.from() else {
        return Ok(());
    };

    // The one place two store locks nest: verify-then-consume must run
    // under both guards, and no await happens while they are held.
    let outcome = {
        let mut carts = state.carts.write().await;
        let mut promos = state.promos.write().await;
        settle_payment(
            &mut carts,
            &mut promos,
            &state.catalog,
            user.id,
            payment.currency.clone(),
            i64::from(payment.total_amount),
        )
    };

    match outcome {
        Ok(total) => {
            tracing::info!(target: "payments", user_id = user.id.0, total, "order settled");
            let buyer = user
                .username
                .as_deref()
                .map(|u| format!("@{u}"))
                .unwrap_or_else(|| user.full_name());
            if state.admin_chat != ChatId(0) {
                let note = format!("✅ New order!\nFrom: {buyer}\nTotal: {}", fmt_price(total));
                if let Err(error) = bot.send_message(state.admin_chat, note).await {
                    tracing::warn!(target: "payments", ?error, "operator notification failed");
                }
            }
            bot.send_message(
                msg.chat.id,
                "🎉 Thanks for your order! We'll be in touch shortly.",
            )
            .await?;
        }
        Err(error) => {
            tracing::error!(target: "payments", user_id = user.id.0, ?error, "settled payment rejected");
            bot.send_message(
                msg.chat.id,
                "We couldn't match this payment to your cart. Nothing was cleared; support \
                 will reach out.",
            )
            .await?;
        }
    }
    Ok(())
}
