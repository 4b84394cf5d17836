//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::{
    carts::records::{Cart, CartLine},
    categories::records::CategoryUuid,
};

use crate::{
    carts::errors::into_status_error, extensions::*, money::format_money,
    products::responses::ImageResponse, state::State,
};

/// A cart line, priced at the product's current effective price.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    /// The product in the cart
    pub id: Uuid,

    pub category: Option<Uuid>,

    pub title: String,

    pub description: String,

    /// Effective unit price
    pub price: String,

    pub count: u32,

    /// `price * count`
    pub total_price: String,

    pub free_delivery: bool,

    pub images: Vec<ImageResponse>,
}

impl From<CartLine> for CartItemResponse {
    fn from(line: CartLine) -> Self {
        let product = line.product;

        Self {
            id: product.uuid.into_uuid(),
            category: product.category_uuid.map(CategoryUuid::into_uuid),
            title: product.title,
            description: product.description,
            price: format_money(line.price),
            count: line.count,
            total_price: format_money(line.total_price),
            free_delivery: product.free_delivery,
            images: product.images.into_iter().map(Into::into).collect(),
        }
    }
}

pub(crate) fn cart_items(cart: Cart) -> Vec<CartItemResponse> {
    cart.lines.into_iter().map(Into::into).collect()
}

/// Get Cart Handler
///
/// Returns the lines of the session's cart.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart lines"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CartItemResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;

    let cart = state
        .app
        .carts
        .get_cart(session)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart_items(cart)))
}
