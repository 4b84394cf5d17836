//! Limited Edition Products Handler

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

/// Limited Edition Products Handler
///
/// Returns limited edition products.
#[endpoint(tags("catalog"), summary = "Limited Edition Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_limited()
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
    async fn test_limited_lists_limited_products() -> TestResult {
        let mut product = make_product("Collector's Edition", Decimal::new(1_999, 2));

        product.limited_edition = true;

        let mut services = MockServices::default();

        services
            .products
            .expect_list_limited()
            .once()
            .return_once(move || Ok(vec![product]));

        let response: Vec<ProductResponse> =
            TestClient::get("http://example.com/api/products/limited")
                .send(&public_service(
                    services,
                    Router::with_path("api/products/limited").get(handler),
                ))
                .await
                .take_json()
                .await?;

        assert_eq!(response.len(), 1);
        assert_eq!(response.first().map(|p| p.price.as_str()), Some("19.99"));

        Ok(())
    }
}
