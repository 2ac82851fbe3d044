//! Promo codes: single-use, idempotent consumption, fixed alphabet.

use rand::SeedableRng;
use rand::rngs::StdRng;
use shopfront_bot::constants::{CODE_ALPHABET, PROMO_CODE_LEN};
use shopfront_bot::services::promos::PromoRegistry;

#[test]
fn issued_codes_are_valid_until_consumed() {
    let mut promos = PromoRegistry::default();
    let mut rng = StdRng::seed_from_u64(1);
    let code = promos.issue(&mut rng);
    assert!(promos.is_valid(&code));
    promos.consume(&code);
    assert!(!promos.is_valid(&code), "a consumed code must never validate again");
}

#[test]
fn consume_is_idempotent_and_ignores_unknown_codes() {
    let mut promos = PromoRegistry::default();
    let mut rng = StdRng::seed_from_u64(2);
    let code = promos.issue(&mut rng);
    promos.consume(&code);
    promos.consume(&code); // second consume is a no-op
    promos.consume("NEVERWAS");
    assert!(!promos.is_valid(&code));
    assert_eq!(promos.outstanding(), 0);
}

#[test]
fn codes_use_the_fixed_alphabet_and_length() {
    let mut promos = PromoRegistry::default();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let code = promos.issue(&mut rng);
        assert_eq!(code.len(), PROMO_CODE_LEN);
        assert!(
            code.bytes().all(|b| CODE_ALPHABET.contains(&b)),
            "code `{code}` strayed from the alphabet"
        );
    }
    assert_eq!(promos.outstanding(), 50, "all 50 codes must be distinct");
}

#[test]
fn unrelated_codes_survive_a_consume() {
    let mut promos = PromoRegistry::default();
    let mut rng = StdRng::seed_from_u64(4);
    let first = promos.issue(&mut rng);
    let second = promos.issue(&mut rng);
    promos.consume(&first);
    assert!(promos.is_valid(&second));
}
