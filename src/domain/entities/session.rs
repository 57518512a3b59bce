//! Per-user shopping sessions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Currency;

/// A shopper's persistent session: display currency plus cart
///
/// The cart maps product id to quantity. Absence of a key means zero; a
/// stored quantity is always at least 1 and an empty cart is an empty map,
/// never a null. Sessions are created lazily and survive checkout with the
/// cart reset to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub currency: Currency,
    pub cart: BTreeMap<i64, u32>,
}

impl Session {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            currency: Currency::BASE,
            cart: BTreeMap::new(),
        }
    }

    /// Increment a product's quantity by one, creating the entry at 1
    pub fn add_item(&mut self, product_id: i64) -> u32 {
        let qty = self.cart.entry(product_id).or_insert(0);
        *qty += 1;
        *qty
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Serialize the cart for the persistence layer
    ///
    /// BTreeMap keys give a stable on-disk ordering.
    pub fn cart_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.cart)
    }

    /// Restore a cart from its persisted form, dropping any zero-quantity
    /// entries a prior version may have written
    pub fn cart_from_json(json: &str) -> Result<BTreeMap<i64, u32>, serde_json::Error> {
        let mut cart: BTreeMap<i64, u32> = serde_json::from_str(json)?;
        cart.retain(|_, qty| *qty > 0);
        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_defaults_to_base_currency_and_empty_cart() {
        let session = Session::new(42);
        assert_eq!(session.currency, Currency::BASE);
        assert!(session.is_cart_empty());
    }

    #[test]
    fn adding_the_same_product_twice_increments_one_entry() {
        let mut session = Session::new(42);
        assert_eq!(session.add_item(7), 1);
        assert_eq!(session.add_item(7), 2);
        assert_eq!(session.cart.len(), 1);
        assert_eq!(session.cart.get(&7), Some(&2));
    }

    #[test]
    fn cart_round_trips_through_json() {
        let mut session = Session::new(42);
        session.add_item(3);
        session.add_item(3);
        session.add_item(9);

        let json = session.cart_json().unwrap();
        let restored = Session::cart_from_json(&json).unwrap();
        assert_eq!(restored, session.cart);
    }

    #[test]
    fn restoring_drops_zero_quantity_entries() {
        let cart = Session::cart_from_json(r#"{"3":0,"9":2}"#).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&9), Some(&2));
    }

    #[test]
    fn empty_cart_serializes_as_empty_map() {
        let session = Session::new(42);
        assert_eq!(session.cart_json().unwrap(), "{}");
    }
}
