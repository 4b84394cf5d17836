//! Order Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Order Index Handler
///
/// Returns the caller's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{MockServices, TEST_USER_UUID, public_service, user_service};

    use super::*;

    fn route() -> Router {
        Router::with_path("api/orders").get(handler)
    }

    #[tokio::test]
    async fn test_index_lists_callers_orders() -> TestResult {
        let mut services = MockServices::default();

        services
            .orders
            .expect_list_orders()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(vec![]));

        let response: Vec<OrderResponse> = TestClient::get("http://example.com/api/orders")
            .send(&user_service(services, route()))
            .await
            .take_json()
            .await?;

        assert!(response.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_without_user_returns_401() -> TestResult {
        let mut services = MockServices::default();

        services.orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/api/orders")
            .send(&public_service(services, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
