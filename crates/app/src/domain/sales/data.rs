//! Sales Data

use jiff::{Zoned, civil::Date};
use rust_decimal::Decimal;

use crate::domain::{products::records::ProductUuid, sales::records::SaleUuid};

/// New Sale Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub uuid: SaleUuid,
    pub product_uuid: ProductUuid,
    pub sale_price: Decimal,
    pub date_from: Date,
    pub date_to: Option<Date>,
}

impl NewSale {
    /// An open-ended sale starting today.
    #[must_use]
    pub fn for_product(product_uuid: ProductUuid, sale_price: Decimal) -> Self {
        Self {
            uuid: SaleUuid::new(),
            product_uuid,
            sale_price,
            date_from: Zoned::now().date(),
            date_to: None,
        }
    }
}
