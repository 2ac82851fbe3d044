use shopfront_bot::interactions::ids;

#[test]
fn grammar_accepts_expected_tokens() {
    for token in [
        "cat_clothing",
        "view_12",
        "add_3",
        "move_0",
        "ttt_solo",
        "back_categories",
        "a",
        "A-1_b",
    ] {
        assert!(ids::is_well_formed(token), "token `{token}` should pass");
    }
    assert!(ids::is_well_formed(&"x".repeat(50)), "50 chars is the cap");
}

#[test]
fn grammar_rejects_malformed_tokens() {
    assert!(!ids::is_well_formed(""));
    assert!(!ids::is_well_formed("has space"));
    assert!(!ids::is_well_formed("semi;colon"));
    assert!(!ids::is_well_formed("emoji_🙂"));
    assert!(!ids::is_well_formed(&"x".repeat(51)), "51 chars is over the cap");
}

#[test]
fn item_id_parsing() {
    assert_eq!(ids::parse_item_id("view_42", ids::VIEW_PREFIX), Some(42));
    assert_eq!(ids::parse_item_id("view_", ids::VIEW_PREFIX), None);
    assert_eq!(ids::parse_item_id("view_abc", ids::VIEW_PREFIX), None);
    assert_eq!(ids::parse_item_id("add_7", ids::ADD_PREFIX), Some(7));
    assert_eq!(
        ids::parse_item_id("inc_7", ids::ADD_PREFIX),
        None,
        "prefixes must not cross-match"
    );
}

#[test]
fn category_parsing() {
    assert_eq!(
        ids::parse_category("cat_clothing", ids::CAT_PREFIX),
        Some("clothing")
    );
    assert_eq!(ids::parse_category("cat_", ids::CAT_PREFIX), None);
    assert_eq!(
        ids::parse_category("back_cat_shoes", ids::BACK_CAT_PREFIX),
        Some("shoes")
    );
}

#[test]
fn move_cell_parsing_accepts_only_board_cells() {
    assert_eq!(ids::parse_move_cell("move_0"), Some(0));
    assert_eq!(ids::parse_move_cell("move_8"), Some(8));
    assert_eq!(ids::parse_move_cell("move_9"), None, "cells run 0..=8");
    assert_eq!(ids::parse_move_cell("move_"), None);
    assert_eq!(ids::parse_move_cell("move_x"), None);
    assert_eq!(ids::parse_move_cell("mv_1"), None);
}

#[test]
fn deep_link_parsing() {
    assert_eq!(ids::parse_deep_link("ttt_AB23CDEF"), Some("AB23CDEF"));
    assert_eq!(ids::parse_deep_link("ttt_"), None);
    assert_eq!(ids::parse_deep_link("shop_AB23"), None);
    assert_eq!(ids::parse_deep_link("ttt_has space"), None);
}
