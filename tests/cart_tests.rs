//! Cart invariants: the 20-unit cap, entry removal at zero, and the
//! promo-discounted total with its zero floor.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shopfront_bot::catalog::{Catalog, Item};
use shopfront_bot::constants::{CART_MAX_UNITS, PROMO_DISCOUNT};
use shopfront_bot::services::carts::CartLedger;
use teloxide::types::UserId;

const ALICE: UserId = UserId(11);
const BOB: UserId = UserId(22);

fn item(id: u32, price: i64) -> Item {
    Item {
        id,
        category: "clothing".to_owned(),
        name: format!("Item {id}"),
        description: "test item".to_owned(),
        price,
        photo_url: None,
    }
}

fn catalog() -> Catalog {
    Catalog::new(vec![item(1, 500), item(2, 1290), item(3, 90)])
}

#[test]
fn add_caps_total_units_at_twenty() {
    let mut carts = CartLedger::default();
    for _ in 0..CART_MAX_UNITS {
        assert!(carts.increment(ALICE, 1));
    }
    assert_eq!(carts.total_units(ALICE), CART_MAX_UNITS);
    assert!(!carts.increment(ALICE, 1), "21st unit must be refused");
    assert!(!carts.add(ALICE, 2, 1), "cap is across all items, not per item");
    assert_eq!(carts.total_units(ALICE), CART_MAX_UNITS);
}

#[test]
fn oversized_add_is_refused_whole() {
    let mut carts = CartLedger::default();
    assert!(carts.add(ALICE, 1, 18));
    assert!(!carts.add(ALICE, 2, 3), "18 + 3 exceeds the cap");
    assert_eq!(carts.quantity(ALICE, 2), 0, "a refused add must not partially apply");
}

#[test]
fn an_absurd_quantity_is_refused_outright() {
    let mut carts = CartLedger::default();
    assert!(!carts.add(ALICE, 1, u32::MAX));
    assert!(carts.is_empty(ALICE));
    // A quantity that would wrap the unit counter past zero must still be
    // caught by the cap check.
    carts.add(ALICE, 1, 5);
    assert!(!carts.add(ALICE, 1, u32::MAX - 3));
    assert_eq!(carts.quantity(ALICE, 1), 5);
}

#[test]
fn decrement_removes_the_entry_at_zero() {
    let mut carts = CartLedger::default();
    carts.add(ALICE, 1, 2);
    carts.decrement(ALICE, 1);
    assert_eq!(carts.quantity(ALICE, 1), 1);
    carts.decrement(ALICE, 1);
    assert_eq!(carts.quantity(ALICE, 1), 0);
    assert!(carts.is_empty(ALICE), "last unit gone means the cart is empty");
    // Extra decrements must not underflow or resurrect the entry.
    carts.decrement(ALICE, 1);
    assert_eq!(carts.quantity(ALICE, 1), 0);
}

#[test]
fn remove_drops_the_whole_line() {
    let mut carts = CartLedger::default();
    carts.add(ALICE, 1, 5);
    carts.add(ALICE, 2, 1);
    carts.remove(ALICE, 1);
    assert_eq!(carts.quantity(ALICE, 1), 0);
    assert_eq!(carts.quantity(ALICE, 2), 1);
}

#[test]
fn totals_sum_price_times_quantity() {
    let catalog = catalog();
    let mut carts = CartLedger::default();
    carts.add(ALICE, 1, 2); // 1000
    carts.add(ALICE, 2, 1); // 1290
    assert_eq!(carts.subtotal(&catalog, ALICE), 2290);
    assert_eq!(carts.total(&catalog, ALICE, false), 2290);
    assert_eq!(carts.total(&catalog, ALICE, true), 2290 - PROMO_DISCOUNT);
}

#[test]
fn discounted_total_floors_at_zero() {
    let catalog = catalog();
    let mut carts = CartLedger::default();
    carts.add(ALICE, 3, 1); // 90, under the 200 discount
    assert_eq!(carts.total(&catalog, ALICE, true), 0);
}

#[test]
fn carts_are_per_user() {
    let mut carts = CartLedger::default();
    carts.add(ALICE, 1, 3);
    assert!(carts.is_empty(BOB));
    assert_eq!(carts.quantity(BOB, 1), 0);
}

#[test]
fn clear_empties_the_cart_and_detaches_the_promo() {
    let mut carts = CartLedger::default();
    carts.add(ALICE, 1, 2);
    carts.attach_promo(ALICE, "WIN23456".to_owned());
    carts.clear(ALICE);
    assert!(carts.is_empty(ALICE));
    assert_eq!(carts.attached_promo(ALICE), None);
}

#[test]
fn awaiting_promo_flag_round_trip() {
    let mut carts = CartLedger::default();
    assert!(!carts.awaiting_promo(ALICE));
    carts.set_awaiting_promo(ALICE);
    assert!(carts.awaiting_promo(ALICE));
    assert!(!carts.awaiting_promo(BOB), "flag is per user");
    carts.clear_awaiting_promo(ALICE);
    assert!(!carts.awaiting_promo(ALICE));
}

#[test]
fn random_churn_never_breaks_the_invariants() {
    let catalog = catalog();
    let mut carts = CartLedger::default();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..2_000 {
        let item_id = rng.random_range(1..=3u32);
        match rng.random_range(0..4u8) {
            0 => {
                carts.add(ALICE, item_id, rng.random_range(1..=4));
            }
            1 => {
                carts.increment(ALICE, item_id);
            }
            2 => carts.decrement(ALICE, item_id),
            _ => carts.remove(ALICE, item_id),
        }
        let total_units = carts.total_units(ALICE);
        assert!(
            total_units <= CART_MAX_UNITS,
            "cap breached: {total_units} units"
        );
        for (id, qty) in carts.entries(ALICE) {
            assert!(qty >= 1, "item {id} kept a zero-quantity entry");
        }
        assert!(carts.subtotal(&catalog, ALICE) >= 0);
        assert!(carts.total(&catalog, ALICE, true) >= 0);
    }
}
