//! Storefront rendering: category menus, product cards, and the cart view.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, UserId};
use teloxide::utils::html;

use crate::catalog::{Catalog, Item};
use crate::constants::PROMO_DISCOUNT;
use crate::interactions::ids;
use crate::services::carts::CartLedger;
use crate::util::fmt_price;

/// Category keys shown in the main menu, with their display labels.
const CATEGORIES: [(&str, &str); 3] = [
    ("clothing", "👕 Clothing"),
    ("shoes", "👟 Shoes"),
    ("accessories", "👜 Accessories"),
];

pub fn welcome_text() -> String {
    "🛍️ Welcome to <b>Shopfront</b>!\n\nPick a category:".to_owned()
}

pub fn category_prompt() -> &'static str {
    "Pick a category:"
}

pub fn category_menu() -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = CATEGORIES
        .iter()
        .map(|(key, label)| {
            vec![InlineKeyboardButton::callback(
                *label,
                format!("{}{key}", ids::CAT_PREFIX),
            )]
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback("🛒 Cart", ids::CART)]);
    InlineKeyboardMarkup::new(rows)
}

pub fn back_to_categories() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(
        "⬅️ Back",
        ids::BACK_CATEGORIES,
    )]])
}

/// Item list for one category, or a friendly empty view.
pub fn category_view(catalog: &Catalog, category: &str) -> (String, InlineKeyboardMarkup) {
    let items = catalog.in_category(category);
    if items.is_empty() {
        return ("Nothing in this category yet.".to_owned(), back_to_categories());
    }
    let mut rows: Vec<Vec<InlineKeyboardButton>> = items
        .iter()
        .map(|item| {
            vec![InlineKeyboardButton::callback(
                format!("{} — {}", item.name, fmt_price(item.price)),
                format!("{}{}", ids::VIEW_PREFIX, item.id),
            )]
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback(
        "⬅️ Back",
        ids::BACK_CATEGORIES,
    )]);
    ("Pick an item:".to_owned(), InlineKeyboardMarkup::new(rows))
}

pub fn product_caption(item: &Item) -> String {
    format!(
        "<b>{}</b>\n\n{}\n\nPrice: {}",
        html::escape(&item.name),
        html::escape(&item.description),
        fmt_price(item.price)
    )
}

pub fn product_keyboard(item: &Item) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![InlineKeyboardButton::callback(
            "➕ Add to cart",
            format!("{}{}", ids::ADD_PREFIX, item.id),
        )],
        vec![InlineKeyboardButton::callback("🛒 Cart", ids::CART)],
        vec![InlineKeyboardButton::callback(
            "⬅️ Back",
            format!("{}{}", ids::BACK_CAT_PREFIX, item.category),
        )],
    ])
}

/// The cart view. `promo` carries the attached code only while it is still
/// redeemable, so the discount line and the total stay honest.
pub fn cart_view(
    catalog: &Catalog,
    carts: &CartLedger,
    user: UserId,
    promo: Option<&str>,
) -> (String, InlineKeyboardMarkup) {
    let entries = carts.entries(user);
    if entries.is_empty() {
        return ("🛒 Your cart is empty.".to_owned(), back_to_categories());
    }

    let mut lines = vec!["🛒 <b>Your cart</b>".to_owned(), String::new()];
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Vec::new();
    for (item_id, qty) in &entries {
        let Some(item) = catalog.get(*item_id) else {
            continue;
        };
        lines.push(format!(
            "• {} ×{qty} — {}",
            html::escape(&item.name),
            fmt_price(item.price * i64::from(*qty))
        ));
        rows.push(vec![
            InlineKeyboardButton::callback("➖", format!("{}{item_id}", ids::DEC_PREFIX)),
            InlineKeyboardButton::callback(
                format!("{} ×{qty}", item.name),
                format!("{}{item_id}", ids::VIEW_PREFIX),
            ),
            InlineKeyboardButton::callback("➕", format!("{}{item_id}", ids::INC_PREFIX)),
            InlineKeyboardButton::callback("✖️", format!("{}{item_id}", ids::REMOVE_PREFIX)),
        ]);
    }

    let subtotal = carts.subtotal(catalog, user);
    let total = carts.total(catalog, user, promo.is_some());
    lines.push(String::new());
    if let Some(code) = promo {
        lines.push(format!("Subtotal: {}", fmt_price(subtotal)));
        lines.push(format!("Promo <code>{code}</code>: −{PROMO_DISCOUNT} ₽"));
    }
    lines.push(format!("<b>Total: {}</b>", fmt_price(total)));

    rows.push(vec![InlineKeyboardButton::callback(
        "🎟 Enter promo code",
        ids::PROMO_ENTER,
    )]);
    rows.push(vec![InlineKeyboardButton::callback("💳 Pay", ids::PAY)]);
    rows.push(vec![InlineKeyboardButton::callback(
        "⬅️ Back",
        ids::BACK_CATEGORIES,
    )]);
    (lines.join("\n"), InlineKeyboardMarkup::new(rows))
}
