//! Session-held cart state.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{carts::errors::CartsServiceError, products::records::ProductUuid};

const SESSION_KEY_MAX_LEN: usize = 64;

/// Opaque identifier of a visitor session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    /// A fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    /// Accept a client-supplied key. Anything but 1..=64 ASCII
    /// alphanumerics, `-` or `_` is rejected.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let valid = !value.is_empty()
            && value.len() <= SESSION_KEY_MAX_LEN
            && value
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

        valid.then(|| Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Requested quantity per product, as stored in the session.
///
/// Quantities are always positive: operations that would leave an entry at
/// zero remove it instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCart {
    entries: BTreeMap<ProductUuid, u32>,

    #[serde(skip)]
    modified: bool,
}

impl SessionCart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increase the quantity of `product` by `count`, creating the entry if needed.
    pub fn add(&mut self, product: ProductUuid, count: u32) -> Result<(), CartsServiceError> {
        if count == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let quantity = self.entries.entry(product).or_insert(0);

        *quantity = quantity.saturating_add(count);

        self.modified = true;

        Ok(())
    }

    /// Drop the entry for `product`. Absent products are ignored.
    pub fn remove(&mut self, product: ProductUuid) {
        if self.entries.remove(&product).is_some() {
            self.modified = true;
        }
    }

    /// Reduce the quantity of `product` by `count`, removing the entry once it
    /// would reach zero. Absent products are ignored.
    pub fn decrement(&mut self, product: ProductUuid, count: u32) {
        let Some(quantity) = self.entries.get_mut(&product) else {
            return;
        };

        if count == 0 {
            return;
        }

        if count >= *quantity {
            self.entries.remove(&product);
        } else {
            *quantity -= count;
        }

        self.modified = true;
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.modified = true;
        }
    }

    #[must_use]
    pub fn quantity(&self, product: ProductUuid) -> Option<u32> {
        self.entries.get(&product).copied()
    }

    /// Sum of quantities across all entries.
    #[must_use]
    pub fn length(&self) -> u64 {
        self.entries.values().map(|&count| u64::from(count)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a mutation has happened since the cart was loaded.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// A copy with the modification flag reset, as a store would hand it back.
    #[must_use]
    pub fn saved_copy(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            modified: false,
        }
    }

    pub fn products(&self) -> impl Iterator<Item = ProductUuid> + '_ {
        self.entries.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn add_accumulates_quantities() -> TestResult {
        let product = ProductUuid::new();
        let mut cart = SessionCart::new();

        cart.add(product, 2)?;
        cart.add(product, 3)?;

        assert_eq!(cart.quantity(product), Some(5));
        assert!(cart.is_modified());

        Ok(())
    }

    #[test]
    fn add_rejects_zero_count() {
        let mut cart = SessionCart::new();

        let result = cart.add(ProductUuid::new(), 0);

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );
        assert!(cart.is_empty());
        assert!(!cart.is_modified());
    }

    #[test]
    fn remove_drops_entry() -> TestResult {
        let product = ProductUuid::new();
        let mut cart = SessionCart::new();

        cart.add(product, 2)?;
        cart.remove(product);

        assert_eq!(cart.quantity(product), None);
        assert_eq!(cart.products().count(), 0);

        Ok(())
    }

    #[test]
    fn remove_of_absent_product_is_a_no_op() {
        let mut cart = SessionCart::new();

        cart.remove(ProductUuid::new());

        assert!(!cart.is_modified());
    }

    #[test]
    fn decrement_keeps_positive_remainder() -> TestResult {
        let product = ProductUuid::new();
        let mut cart = SessionCart::new();

        cart.add(product, 5)?;
        cart.decrement(product, 2);

        assert_eq!(cart.quantity(product), Some(3));

        Ok(())
    }

    #[test]
    fn decrement_to_zero_or_below_removes_entry() -> TestResult {
        let exact = ProductUuid::new();
        let over = ProductUuid::new();
        let mut cart = SessionCart::new();

        cart.add(exact, 2)?;
        cart.add(over, 1)?;

        cart.decrement(exact, 2);
        cart.decrement(over, 7);

        assert_eq!(cart.quantity(exact), None);
        assert_eq!(cart.quantity(over), None);
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn decrement_of_absent_product_is_a_no_op() {
        let mut cart = SessionCart::new();

        cart.decrement(ProductUuid::new(), 1);

        assert!(cart.is_empty());
        assert!(!cart.is_modified());
    }

    #[test]
    fn length_sums_quantities() -> TestResult {
        let mut cart = SessionCart::new();

        cart.add(ProductUuid::new(), 2)?;
        cart.add(ProductUuid::new(), 3)?;

        assert_eq!(cart.length(), 5);

        Ok(())
    }

    #[test]
    fn clear_empties_cart() -> TestResult {
        let mut cart = SessionCart::new();

        cart.add(ProductUuid::new(), 2)?;
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.length(), 0);

        Ok(())
    }

    #[test]
    fn stored_form_is_a_product_keyed_object() -> TestResult {
        let product = ProductUuid::new();
        let mut cart = SessionCart::new();

        cart.add(product, 4)?;

        let encoded = serde_json::to_value(&cart)?;

        assert_eq!(encoded, serde_json::json!({ product.to_string(): 4 }));

        let decoded: SessionCart = serde_json::from_value(encoded)?;

        assert_eq!(decoded.quantity(product), Some(4));
        assert!(!decoded.is_modified());

        Ok(())
    }

    #[test]
    fn session_keys_are_validated() {
        assert!(SessionKey::parse("abc-DEF_123").is_some());
        assert!(SessionKey::parse("").is_none());
        assert!(SessionKey::parse("has space").is_none());
        assert!(SessionKey::parse(&"a".repeat(65)).is_none());
        assert!(SessionKey::parse(SessionKey::generate().as_str()).is_some());
    }
}
