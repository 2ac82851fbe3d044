//! Centralized callback-token constants for inline keyboards.
//! Consolidating here reduces typos and keeps the grammar check, the
//! keyboards, and the family routing in `handler` in one vocabulary.

/// Tokens must match `^[a-zA-Z0-9_-]{1,50}$`; anything else is dropped
/// before dispatch.
pub const TOKEN_MAX_LEN: usize = 50;

// Storefront
pub const CAT_PREFIX: &str = "cat_"; // followed by category key
pub const VIEW_PREFIX: &str = "view_"; // followed by item id
pub const ADD_PREFIX: &str = "add_"; // followed by item id
pub const INC_PREFIX: &str = "inc_"; // followed by item id
pub const DEC_PREFIX: &str = "dec_"; // followed by item id
pub const REMOVE_PREFIX: &str = "remove_"; // followed by item id
pub const BACK_CAT_PREFIX: &str = "back_cat_"; // followed by category key
pub const BACK_CATEGORIES: &str = "back_categories";
pub const CART: &str = "cart";
pub const PAY: &str = "pay";
pub const PROMO_ENTER: &str = "promo_enter";

// Mini-game
pub const TTT_SOLO: &str = "ttt_solo";
pub const TTT_INVITE: &str = "ttt_invite";
pub const MOVE_PREFIX: &str = "move_"; // followed by cell index 0..=8

/// `/start` payload prefix carrying an invite id.
pub const DEEP_LINK_PREFIX: &str = "ttt_";

/// Grammar check applied to every incoming callback token.
pub fn is_well_formed(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= TOKEN_MAX_LEN
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Parse `<prefix><item-id>` into the numeric item id.
pub fn parse_item_id(token: &str, prefix: &str) -> Option<u32> {
    token.strip_prefix(prefix)?.parse().ok()
}

/// Parse `<prefix><category>` into the category key.
pub fn parse_category<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = token.strip_prefix(prefix)?;
    (!rest.is_empty()).then_some(rest)
}

/// Parse `move_<cell>` into a board cell index (0..=8).
pub fn parse_move_cell(token: &str) -> Option<usize> {
    let cell: usize = token.strip_prefix(MOVE_PREFIX)?.parse().ok()?;
    (cell < 9).then_some(cell)
}

/// Extract the invite id from a `ttt_<invite-id>` deep-link payload.
pub fn parse_deep_link(payload: &str) -> Option<&str> {
    let id = payload.strip_prefix(DEEP_LINK_PREFIX)?;
    (!id.is_empty() && is_well_formed(id)).then_some(id)
}
