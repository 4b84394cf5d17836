//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::orders::data::NewOrderLine;

use crate::{
    extensions::*,
    observability::record_order_created,
    orders::{OrderIdResponse, errors::into_status_error},
    state::State,
};

/// Order Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineRequest {
    /// The product to order
    pub id: Uuid,

    /// Units to order
    pub count: u32,
}

impl From<OrderLineRequest> for NewOrderLine {
    fn from(line: OrderLineRequest) -> Self {
        NewOrderLine {
            product_uuid: line.id.into(),
            count: line.count,
        }
    }
}

/// Create Order Handler
///
/// Creates an order for the caller from the given lines, freezing its total
/// at current effective prices.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<Vec<OrderLineRequest>>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderIdResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let lines = json.into_inner().into_iter().map(Into::into).collect();

    let order = state
        .app
        .orders
        .create_order(user, lines)
        .await
        .map_err(into_status_error)?;

    record_order_created();

    res.add_header(LOCATION, format!("/api/orders/{order}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderIdResponse {
        order_id: order.into_uuid(),
    }))
}
