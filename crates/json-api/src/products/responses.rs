//! Product response bodies shared by the catalog endpoints.

use rust_decimal::prelude::ToPrimitive as _;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::{
    categories::records::CategoryUuid,
    products::records::{ProductImageRecord, ProductRecord},
};

use crate::{money::format_money, tags::TagResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImageResponse {
    /// Image path
    pub src: String,

    /// Alternative text
    pub alt: String,
}

impl From<ProductImageRecord> for ImageResponse {
    fn from(image: ProductImageRecord) -> Self {
        Self {
            src: image.src,
            alt: image.name,
        }
    }
}

/// A product as shown in listings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: Uuid,

    /// The category the product belongs to
    pub category: Option<Uuid>,

    /// Effective price: the sale price when one exists, else the list price
    pub price: String,

    /// Units in stock
    pub count: i32,

    /// The date and time the product was listed
    pub date: String,

    pub title: String,

    pub description: String,

    pub free_delivery: bool,

    pub images: Vec<ImageResponse>,

    pub tags: Vec<TagResponse>,

    /// Number of reviews
    pub reviews: i64,

    pub rating: f64,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            id: product.uuid.into_uuid(),
            category: product.category_uuid.map(CategoryUuid::into_uuid),
            price: format_money(product.listed_price()),
            count: product.count,
            date: product.created_at.to_string(),
            title: product.title,
            description: product.description,
            free_delivery: product.free_delivery,
            images: product.images.into_iter().map(Into::into).collect(),
            tags: product.tags.into_iter().map(Into::into).collect(),
            reviews: product.reviews_count,
            rating: product.rating.to_f64().unwrap_or_default(),
        }
    }
}

pub(crate) fn product_list(products: Vec<ProductRecord>) -> Vec<ProductResponse> {
    products.into_iter().map(Into::into).collect()
}
