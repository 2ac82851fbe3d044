//! Settlement verification: a paid invoice is matched against the current
//! cart before anything is cleared, and promo codes are spent exactly once.

use rand::SeedableRng;
use rand::rngs::StdRng;
use shopfront_bot::catalog::{Catalog, Item};
use shopfront_bot::constants::{CURRENCY, PROMO_DISCOUNT};
use shopfront_bot::payments::{CheckoutError, invoice_amount, settle_payment};
use shopfront_bot::services::carts::CartLedger;
use shopfront_bot::services::promos::PromoRegistry;
use teloxide::types::{Currency, UserId};

const BUYER: UserId = UserId(7);

fn item(id: u32, price: i64) -> Item {
    Item {
        id,
        category: "tea".to_owned(),
        name: format!("Item {id}"),
        description: String::new(),
        price,
        photo_url: None,
    }
}

fn catalog() -> Catalog {
    Catalog::new(vec![item(1, 500), item(2, 120)])
}

#[test]
fn non_rub_settlements_are_refused_and_nothing_changes() {
    let catalog = catalog();
    let mut carts = CartLedger::default();
    let mut promos = PromoRegistry::default();
    carts.add(BUYER, 1, 2);

    for paid in [Currency::USD, Currency::EUR] {
        let outcome = settle_payment(
            &mut carts,
            &mut promos,
            &catalog,
            BUYER,
            paid.clone(),
            100_000,
        );
        assert_eq!(outcome, Err(CheckoutError::CurrencyMismatch { paid }));
        assert_eq!(carts.quantity(BUYER, 1), 2, "the cart must survive a refusal");
    }
}

#[test]
fn wrong_amount_is_refused_with_both_figures() {
    let catalog = catalog();
    let mut carts = CartLedger::default();
    let mut promos = PromoRegistry::default();
    carts.add(BUYER, 1, 1);

    let outcome = settle_payment(&mut carts, &mut promos, &catalog, BUYER, CURRENCY, 49_999);
    assert_eq!(
        outcome,
        Err(CheckoutError::AmountMismatch {
            expected_minor: 50_000,
            paid_minor: 49_999,
        })
    );
    assert!(!carts.is_empty(BUYER));
}

#[test]
fn exact_payment_clears_the_cart_and_consumes_the_promo() {
    let catalog = catalog();
    let mut carts = CartLedger::default();
    let mut promos = PromoRegistry::default();
    let mut rng = StdRng::seed_from_u64(1);

    let code = promos.issue(&mut rng);
    carts.add(BUYER, 1, 2);
    carts.add(BUYER, 2, 1);
    carts.attach_promo(BUYER, code.clone());

    // 2 x 500 + 1 x 120, minus the discount, in minor units.
    let expected = (1_120 - PROMO_DISCOUNT) * 100;
    let outcome = settle_payment(&mut carts, &mut promos, &catalog, BUYER, CURRENCY, expected);
    assert_eq!(outcome, Ok(expected / 100));
    assert!(carts.is_empty(BUYER), "a settled order empties the cart");
    assert_eq!(carts.attached_promo(BUYER), None);
    assert!(!promos.is_valid(&code), "a settled order spends the code");
}

#[test]
fn promo_codes_are_bearer_tokens() {
    // The code is not bound to whoever won it; any holder may attach it.
    let catalog = catalog();
    let mut carts = CartLedger::default();
    let mut promos = PromoRegistry::default();
    let mut rng = StdRng::seed_from_u64(2);

    let code = promos.issue(&mut rng);
    let stranger = UserId(99);
    carts.add(stranger, 1, 1);
    carts.attach_promo(stranger, code.clone());

    let expected = (500 - PROMO_DISCOUNT) * 100;
    let outcome = settle_payment(&mut carts, &mut promos, &catalog, stranger, CURRENCY, expected);
    assert_eq!(outcome, Ok(expected / 100));
    assert!(!promos.is_valid(&code));
}

#[test]
fn a_code_spent_elsewhere_no_longer_discounts() {
    // The invoice went out while the code was valid, but the same bearer
    // code was redeemed on another order before this payment settled. The
    // discounted amount no longer matches and the settlement is refused.
    let catalog = catalog();
    let mut carts = CartLedger::default();
    let mut promos = PromoRegistry::default();
    let mut rng = StdRng::seed_from_u64(3);

    let code = promos.issue(&mut rng);
    carts.add(BUYER, 1, 1);
    carts.attach_promo(BUYER, code.clone());
    promos.consume(&code);

    let discounted = (500 - PROMO_DISCOUNT) * 100;
    let outcome = settle_payment(&mut carts, &mut promos, &catalog, BUYER, CURRENCY, discounted);
    assert_eq!(
        outcome,
        Err(CheckoutError::AmountMismatch {
            expected_minor: 50_000,
            paid_minor: discounted,
        })
    );

    // Paying the undiscounted total settles fine.
    let outcome = settle_payment(&mut carts, &mut promos, &catalog, BUYER, CURRENCY, 50_000);
    assert_eq!(outcome, Ok(500));
    assert!(carts.is_empty(BUYER));
}

#[test]
fn invoice_amounts_must_fit_the_platform_field() {
    assert_eq!(invoice_amount(500), Some(50_000));
    // i32::MAX is 2_147_483_647 in minor units, so 21_474_836 whole rubles
    // still fit and one more ruble does not.
    assert_eq!(invoice_amount(21_474_836), Some(2_147_483_600));
    assert_eq!(invoice_amount(21_474_837), None);
    assert_eq!(invoice_amount(i64::MAX / 50), None, "the x100 step must not wrap");
}
