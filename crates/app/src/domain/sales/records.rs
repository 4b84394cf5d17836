//! Sale Records

use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::{
    domain::products::records::{ProductImageRecord, ProductUuid},
    uuids::TypedUuid,
};

/// Sale UUID
pub type SaleUuid = TypedUuid<SaleRecord>;

/// Sale Record, joined with the product it discounts.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub uuid: SaleUuid,
    pub product_uuid: ProductUuid,
    pub sale_price: Decimal,
    pub date_from: Date,
    pub date_to: Option<Date>,
    pub product_title: String,
    /// List price of the product.
    pub product_price: Decimal,
    pub images: Vec<ProductImageRecord>,
}
