//! Per-user carts: item quantities, promo attachment, and the
//! waiting-for-promo-text flag.

use std::collections::{BTreeMap, HashMap, HashSet};

use teloxide::types::UserId;

use crate::catalog::Catalog;
use crate::constants::{CART_MAX_UNITS, PROMO_DISCOUNT};

#[derive(Debug, Default)]
pub struct CartLedger {
    /// item id -> quantity, per user. Quantities are always >= 1; an entry
    /// that would drop to zero is removed instead.
    carts: HashMap<UserId, BTreeMap<u32, u32>>,
    /// Promo code attached to the user's next checkout.
    attached: HashMap<UserId, String>,
    /// Users whose next plain text message is a promo-code entry.
    awaiting_promo: HashSet<UserId>,
}

impl CartLedger {
    /// Add `qty` units of an item. Returns false (and changes nothing) when
    /// the cart would exceed its unit cap.
    pub fn add(&mut self, user: UserId, item: u32, qty: u32) -> bool {
        if qty == 0 || self.total_units(user).saturating_add(qty) > CART_MAX_UNITS {
            return false;
        }
        *self
            .carts
            .entry(user)
            .or_default()
            .entry(item)
            .or_insert(0) += qty;
        true
    }

    pub fn increment(&mut self, user: UserId, item: u32) -> bool {
        self.add(user, item, 1)
    }

    /// Drop one unit. Removing the last unit removes the line, and an empty
    /// cart disappears entirely.
    pub fn decrement(&mut self, user: UserId, item: u32) {
        let Some(cart) = self.carts.get_mut(&user) else {
            return;
        };
        if let Some(qty) = cart.get_mut(&item) {
            *qty -= 1;
            if *qty == 0 {
                cart.remove(&item);
            }
        }
        if cart.is_empty() {
            self.carts.remove(&user);
        }
    }

    /// Drop an entire line regardless of quantity.
    pub fn remove(&mut self, user: UserId, item: u32) {
        let Some(cart) = self.carts.get_mut(&user) else {
            return;
        };
        cart.remove(&item);
        if cart.is_empty() {
            self.carts.remove(&user);
        }
    }

    pub fn is_empty(&self, user: UserId) -> bool {
        self.carts.get(&user).map(BTreeMap::is_empty).unwrap_or(true)
    }

    pub fn total_units(&self, user: UserId) -> u32 {
        self.carts
            .get(&user)
            .map(|cart| cart.values().sum())
            .unwrap_or(0)
    }

    pub fn quantity(&self, user: UserId, item: u32) -> u32 {
        self.carts
            .get(&user)
            .and_then(|cart| cart.get(&item).copied())
            .unwrap_or(0)
    }

    /// Cart lines in stable item-id order.
    pub fn entries(&self, user: UserId) -> Vec<(u32, u32)> {
        self.carts
            .get(&user)
            .map(|cart| cart.iter().map(|(id, qty)| (*id, *qty)).collect())
            .unwrap_or_default()
    }

    /// Sum of price x quantity over the cart. Items missing from the catalog
    /// contribute nothing.
    pub fn subtotal(&self, catalog: &Catalog, user: UserId) -> i64 {
        self.carts
            .get(&user)
            .map(|cart| {
                cart.iter()
                    .map(|(id, qty)| {
                        catalog
                            .get(*id)
                            .map(|item| item.price * i64::from(*qty))
                            .unwrap_or(0)
                    })
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Payable total: the subtotal, minus the flat discount when a promo
    /// applies, floored at zero.
    pub fn total(&self, catalog: &Catalog, user: UserId, promo_applied: bool) -> i64 {
        let subtotal = self.subtotal(catalog, user);
        if promo_applied {
            (subtotal - PROMO_DISCOUNT).max(0)
        } else {
            subtotal
        }
    }

    /// Empty the cart and drop any attached promo code.
    pub fn clear(&mut self, user: UserId) {
        self.carts.remove(&user);
        self.attached.remove(&user);
    }

    pub fn attach_promo(&mut self, user: UserId, code: String) {
        self.attached.insert(user, code);
    }

    pub fn attached_promo(&self, user: UserId) -> Option<&str> {
        self.attached.get(&user).map(String::as_str)
    }

    pub fn set_awaiting_promo(&mut self, user: UserId) {
        self.awaiting_promo.insert(user);
    }

    pub fn awaiting_promo(&self, user: UserId) -> bool {
        self.awaiting_promo.contains(&user)
    }

    pub fn clear_awaiting_promo(&mut self, user: UserId) {
        self.awaiting_promo.remove(&user);
    }
}
