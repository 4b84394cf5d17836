//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        products::records::ProductUuid,
        profiles::records::ProfileUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Status given to new orders.
pub const STATUS_CREATED: &str = "created";

/// Status set by every order update.
pub const STATUS_IN_PROGRESS: &str = "In Progress";

/// Order Record, with the customer's contact details and purchased products.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub created_at: Timestamp,
    pub profile_uuid: ProfileUuid,
    pub delivery_type: String,
    pub payment_type: String,
    /// Frozen at creation.
    pub total_cost: Decimal,
    pub status: String,
    pub city: String,
    pub address: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub products: Vec<OrderProductRecord>,
}

/// A product purchased in an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderProductRecord {
    pub product_uuid: ProductUuid,
    pub title: String,
    /// Current effective price of the product.
    pub price: Decimal,
    /// Units across every line naming this product.
    pub count: i64,
}
