//! Products Data

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::domain::{
    categories::records::CategoryUuid, products::records::ProductUuid, tags::records::TagUuid,
};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub title: String,
    pub description: String,
    pub full_description: String,
    pub price: Decimal,
    pub count: i32,
    pub free_delivery: bool,
    pub limited_edition: bool,
    pub rating: Decimal,
    pub active: bool,
    pub category_uuid: Option<CategoryUuid>,
    pub images: Vec<NewProductImage>,
    pub specifications: Vec<NewSpecification>,
}

impl NewProduct {
    /// An active product with the given title and list price and neutral defaults elsewhere.
    #[must_use]
    pub fn active(title: impl Into<String>, price: Decimal) -> Self {
        Self {
            uuid: ProductUuid::new(),
            title: title.into(),
            description: String::new(),
            full_description: String::new(),
            price,
            count: 0,
            free_delivery: true,
            limited_edition: false,
            rating: Decimal::ZERO,
            active: true,
            category_uuid: None,
            images: Vec::new(),
            specifications: Vec::new(),
        }
    }
}

/// New Product Image Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductImage {
    pub name: String,
    pub src: String,
}

/// New Product Specification Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpecification {
    pub name: String,
    pub value: String,
}

/// Catalog filter. Every field is optional; unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the title.
    pub name: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Only products with free delivery.
    pub free_delivery: bool,
    /// Only products with units in stock.
    pub available: bool,
    /// Products carrying any of these tags.
    pub tags: SmallVec<[TagUuid; 4]>,
    pub category: Option<CategoryUuid>,
}

/// Catalog sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    Rating,
    Reviews,
    Date,
}

impl SortField {
    pub(crate) const fn column(self) -> &'static str {
        match self {
            Self::Price => "p.price",
            Self::Rating => "p.rating",
            Self::Reviews => "reviews_count",
            Self::Date => "p.created_at",
        }
    }
}

/// Catalog sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub(crate) const fn keyword(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Catalog sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSort {
    pub field: SortField,
    pub direction: SortDirection,
}
