//! Popular Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        responses::{ProductResponse, product_list},
    },
    state::State,
};

/// Popular Products Handler
///
/// Returns active products, most reviewed first.
#[endpoint(tags("catalog"), summary = "Popular Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_popular()
        .await
        .map_err(into_status_error)?;

    Ok(Json(product_list(products)))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{MockServices, make_product, public_service};

    use super::*;

    #[tokio::test]
    async fn test_popular_keeps_service_order() -> TestResult {
        let mut reviewed = make_product("Reviewed", Decimal::new(10, 0));
        let quiet = make_product("Quiet", Decimal::new(20, 0));

        reviewed.reviews_count = 4;

        let mut services = MockServices::default();

        services
            .products
            .expect_list_popular()
            .once()
            .return_once(move || Ok(vec![reviewed, quiet]));

        let response: Vec<ProductResponse> =
            TestClient::get("http://example.com/api/products/popular")
                .send(&public_service(
                    services,
                    Router::with_path("api/products/popular").get(handler),
                ))
                .await
                .take_json()
                .await?;

        let titles: Vec<&str> = response.iter().map(|p| p.title.as_str()).collect();

        assert_eq!(titles, ["Reviewed", "Quiet"]);
        assert_eq!(response.first().map(|p| p.reviews), Some(4));

        Ok(())
    }
}
