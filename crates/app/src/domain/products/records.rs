//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{categories::records::CategoryUuid, pricing, tags::records::TagRecord},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub category_uuid: Option<CategoryUuid>,
    pub title: String,
    pub description: String,
    pub full_description: String,
    /// List price.
    pub price: Decimal,
    /// Price of the first sale recorded for this product, if any.
    pub sale_price: Option<Decimal>,
    /// Units available.
    pub count: i32,
    pub free_delivery: bool,
    pub limited_edition: bool,
    pub rating: Decimal,
    pub active: bool,
    pub reviews_count: i64,
    pub created_at: Timestamp,
    pub images: Vec<ProductImageRecord>,
    pub tags: Vec<TagRecord>,
    pub specifications: Vec<SpecificationRecord>,
}

impl ProductRecord {
    /// The price shown in listings: the sale price when one exists, else the list price.
    #[must_use]
    pub fn listed_price(&self) -> Decimal {
        pricing::resolve_price(self.price, self.sale_price)
    }
}

/// Product Image Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImageRecord {
    pub name: String,
    pub src: String,
}

/// Specification UUID
pub type SpecificationUuid = TypedUuid<SpecificationRecord>;

/// Product Specification Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificationRecord {
    pub uuid: SpecificationUuid,
    pub name: String,
    pub value: String,
}
