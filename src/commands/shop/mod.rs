//! Storefront surface shared by `/start` and the category/cart button
//! flows in `interactions::shop_handler`.

pub mod ui;
