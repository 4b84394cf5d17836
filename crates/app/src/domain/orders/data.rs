//! Orders Data

use crate::domain::products::records::ProductUuid;

/// One requested product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_uuid: ProductUuid,
    pub count: u32,
}

/// Partial order update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderUpdate {
    pub delivery_type: Option<String>,
    pub payment_type: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
}
