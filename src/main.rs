use std::env;
use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ChatId;
use teloxide::update_listeners::webhooks;
use tracing_subscriber::EnvFilter;

use shopfront_bot::catalog::Catalog;
use shopfront_bot::constants::CATALOG_PATH;
use shopfront_bot::handler;
use shopfront_bot::model::AppState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let token = env::var("BOT_TOKEN").expect("BOT_TOKEN must be set");
    let admin_chat = ChatId(
        env::var("ADMIN_CHAT_ID")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0),
    );
    let provider_token = env::var("PROVIDER_TOKEN").unwrap_or_default();
    if provider_token.is_empty() {
        tracing::warn!("PROVIDER_TOKEN is empty; invoices are disabled");
    }
    if admin_chat == ChatId(0) {
        tracing::warn!("ADMIN_CHAT_ID is not set; order notifications are disabled");
    }

    let catalog = Catalog::load(CATALOG_PATH);
    let state = Arc::new(AppState::new(catalog, admin_chat, provider_token));

    let bot = Bot::new(token);
    let mut dispatcher = Dispatcher::builder(bot.clone(), handler::schema())
        .dependencies(dptree::deps![state])
        .default_handler(|update| async move {
            tracing::debug!(target: "router", update_id = update.id, "unhandled update kind");
        })
        .enable_ctrlc_handler()
        .build();

    // Webhook mode when a public URL is configured, long polling otherwise.
    match env::var("WEBHOOK_URL") {
        Ok(base) if !base.is_empty() => {
            let port: u16 = env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(10_000);
            let addr = ([0, 0, 0, 0], port).into();
            let url = format!("{}/webhook", base.trim_end_matches('/'))
                .parse()
                .expect("WEBHOOK_URL must be a valid URL");
            tracing::info!(%url, port, "starting in webhook mode");
            let listener = webhooks::axum(bot, webhooks::Options::new(addr, url))
                .await
                .expect("failed to register the webhook");
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("update listener error"),
                )
                .await;
        }
        _ => {
            tracing::info!("starting in long-polling mode");
            dispatcher.dispatch().await;
        }
    }
}
