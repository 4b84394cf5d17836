//! Test Helpers

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::products::records::{ProductRecord, ProductUuid};

/// An in-memory active product, as the catalog would return it.
pub(crate) fn product_record(title: &str, price: Decimal) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        category_uuid: None,
        title: title.to_string(),
        description: String::new(),
        full_description: String::new(),
        price,
        sale_price: None,
        count: 1,
        free_delivery: false,
        limited_edition: false,
        rating: Decimal::ZERO,
        active: true,
        reviews_count: 0,
        created_at: Timestamp::now(),
        images: Vec::new(),
        tags: Vec::new(),
        specifications: Vec::new(),
    }
}
