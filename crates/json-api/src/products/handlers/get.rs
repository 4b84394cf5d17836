//! Get Product Handler

use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive as _;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::{
    categories::records::CategoryUuid,
    products::records::{ProductRecord, SpecificationRecord},
    reviews::records::ReviewRecord,
};

use crate::{
    extensions::*,
    money::format_money,
    products::{errors::into_status_error, responses::ImageResponse},
    reviews::{self, ReviewResponse},
    state::State,
    tags::TagResponse,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SpecificationResponse {
    pub id: Uuid,

    pub name: String,

    pub value: String,
}

impl From<SpecificationRecord> for SpecificationResponse {
    fn from(specification: SpecificationRecord) -> Self {
        Self {
            id: specification.uuid.into_uuid(),
            name: specification.name,
            value: specification.value,
        }
    }
}

/// A product with its full description, reviews and specifications.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductDetailResponse {
    pub id: Uuid,

    pub category: Option<Uuid>,

    /// Effective price: the sale price when one exists, else the list price
    pub price: String,

    pub count: i32,

    pub date: String,

    pub title: String,

    pub description: String,

    pub full_description: String,

    pub free_delivery: bool,

    pub images: Vec<ImageResponse>,

    pub tags: Vec<TagResponse>,

    /// Reviews, oldest first
    pub reviews: Vec<ReviewResponse>,

    pub specifications: Vec<SpecificationResponse>,

    pub rating: f64,
}

impl ProductDetailResponse {
    fn new(product: ProductRecord, reviews: Vec<ReviewRecord>) -> Self {
        Self {
            id: product.uuid.into_uuid(),
            category: product.category_uuid.map(CategoryUuid::into_uuid),
            price: format_money(product.listed_price()),
            count: product.count,
            date: product.created_at.to_string(),
            title: product.title,
            description: product.description,
            full_description: product.full_description,
            free_delivery: product.free_delivery,
            images: product.images.into_iter().map(Into::into).collect(),
            tags: product.tags.into_iter().map(Into::into).collect(),
            reviews: reviews.into_iter().map(Into::into).collect(),
            specifications: product.specifications.into_iter().map(Into::into).collect(),
            rating: product.rating.to_f64().unwrap_or_default(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product with its reviews and specifications.
#[endpoint(tags("catalog"), summary = "Get Product")]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product_uuid = product.into_inner().into();

    let product = state
        .app
        .products
        .get_product(product_uuid)
        .await
        .map_err(into_status_error)?;

    let reviews = state
        .app
        .reviews
        .list_reviews(product_uuid)
        .await
        .map_err(reviews::errors::into_status_error)?;

    Ok(Json(ProductDetailResponse::new(product, reviews)))
}
