//! Banner Products Handler

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

/// Banner Products Handler
///
/// Returns limited edition products of favourite categories.
#[endpoint(tags("catalog"), summary = "Banner Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_banners()
        .await
        .map_err(into_status_error)?;

    Ok(Json(product_list(products)))
}
