//! Button-press handling, split by token family.
//!
//! The main `handler.rs` routes every callback query here after the grammar
//! check and the rate limiter: storefront tokens go to `shop_handler`, game
//! tokens to `game_handler`. Token constants and parsers live in `ids`, and
//! `util` holds the ack/edit helpers both families share.

pub mod game_handler;
pub mod ids;
pub mod shop_handler;
pub mod util;
