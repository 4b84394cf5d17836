//! Update Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::orders::data::OrderUpdate;

use crate::{
    extensions::*,
    orders::{OrderIdResponse, errors::into_status_error},
    state::State,
};

/// Update Order Request. Omitted fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct UpdateOrderRequest {
    pub delivery_type: Option<String>,

    pub payment_type: Option<String>,

    pub city: Option<String>,

    pub address: Option<String>,
}

impl From<UpdateOrderRequest> for OrderUpdate {
    fn from(request: UpdateOrderRequest) -> Self {
        OrderUpdate {
            delivery_type: request.delivery_type,
            payment_type: request.payment_type,
            city: request.city,
            address: request.address,
        }
    }
}

/// Update Order Handler
///
/// Applies the supplied fields and marks the order in progress.
#[endpoint(
    tags("orders"),
    summary = "Update Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderIdResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let order = order.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let order = state
        .app
        .orders
        .update_order(user, order.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_uuid = %order, "updated order");

    Ok(Json(OrderIdResponse {
        order_id: order.into_uuid(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::domain::orders::{OrdersServiceError, records::OrderUuid};

    use crate::test_helpers::{MockServices, TEST_USER_UUID, user_service};

    use super::*;

    fn make_service(services: MockServices) -> Service {
        user_service(
            services,
            Router::with_path("api/orders/{order}").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_update_passes_only_supplied_fields() -> TestResult {
        let order = OrderUuid::new();

        let mut services = MockServices::default();

        services
            .orders
            .expect_update_order()
            .once()
            .withf(move |user, uuid, update| {
                *user == TEST_USER_UUID
                    && *uuid == order
                    && *update
                        == OrderUpdate {
                            city: Some("Kazan".to_string()),
                            ..OrderUpdate::default()
                        }
            })
            .return_once(|_, uuid, _| Ok(uuid));

        let response: OrderIdResponse =
            TestClient::patch(format!("http://example.com/api/orders/{order}"))
                .json(&json!({ "city": "Kazan" }))
                .send(&make_service(services))
                .await
                .take_json()
                .await?;

        assert_eq!(response.order_id, order.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_with_empty_body_still_updates() -> TestResult {
        let mut services = MockServices::default();

        services
            .orders
            .expect_update_order()
            .once()
            .withf(|_, _, update| *update == OrderUpdate::default())
            .return_once(|_, uuid, _| Ok(uuid));

        let res = TestClient::patch(format!("http://example.com/api/orders/{}", OrderUuid::new()))
            .json(&json!({}))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_foreign_order_returns_404() -> TestResult {
        let mut services = MockServices::default();

        services
            .orders
            .expect_update_order()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::patch(format!("http://example.com/api/orders/{}", OrderUuid::new()))
            .json(&json!({ "address": "Main St 1" }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
