//! Cart views.

use rust_decimal::Decimal;

use crate::domain::products::records::ProductRecord;

/// A cart line priced at read time.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: ProductRecord,
    pub count: u32,
    /// Effective unit price.
    pub price: Decimal,
    /// `price * count`.
    pub total_price: Decimal,
}

/// The priced contents of a session cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    /// Lines in product uuid order.
    pub lines: Vec<CartLine>,
    pub total_price: Decimal,
    /// Sum of stored quantities.
    pub length: u64,
}
