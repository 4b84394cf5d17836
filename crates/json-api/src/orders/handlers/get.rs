//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::orders::records::{OrderProductRecord, OrderRecord};

use crate::{extensions::*, money::format_money, orders::errors::into_status_error, state::State};

const ORDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Order Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderProductResponse {
    /// The ordered product
    pub id: Uuid,

    pub title: String,

    /// Current effective unit price
    pub price: String,

    /// Units ordered, summed over the order's lines
    pub count: i64,
}

impl From<OrderProductRecord> for OrderProductResponse {
    fn from(product: OrderProductRecord) -> Self {
        Self {
            id: product.product_uuid.into_uuid(),
            title: product.title,
            price: format_money(product.price),
            count: product.count,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub id: Uuid,

    pub created_at: String,

    pub full_name: String,

    pub email: String,

    pub phone: String,

    pub delivery_type: String,

    pub payment_type: String,

    /// Total frozen at creation
    pub total_cost: String,

    pub status: String,

    pub city: String,

    pub address: String,

    pub products: Vec<OrderProductResponse>,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            id: order.uuid.into_uuid(),
            created_at: order.created_at.strftime(ORDER_DATE_FORMAT).to_string(),
            full_name: order.full_name,
            email: order.email,
            phone: order.phone,
            delivery_type: order.delivery_type,
            payment_type: order.payment_type,
            total_cost: format_money(order.total_cost),
            status: order.status,
            city: order.city,
            address: order.address,
            products: order.products.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Order Handler
///
/// Returns one of the caller's orders.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .get_order(user, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
