//! Catalog Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use marketplace_app::domain::{
    categories::records::CategoryUuid,
    products::data::{ProductFilter, ProductSort, SortDirection, SortField},
    tags::records::TagUuid,
};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        responses::{ProductResponse, product_list},
    },
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogResponse {
    /// Matching products
    pub items: Vec<ProductResponse>,
}

/// Catalog Handler
///
/// Returns active products matching the `filter[...]`, `tags[]` and
/// `category` query parameters, ordered by `sort`/`sortType`.
#[endpoint(tags("catalog"), summary = "Browse Catalog")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CatalogResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let filter = catalog_filter(req)?;
    let sort = catalog_sort(req)?;

    let products = state
        .app
        .products
        .list_products(filter, sort)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CatalogResponse {
        items: product_list(products),
    }))
}

fn catalog_filter(req: &Request) -> Result<ProductFilter, StatusError> {
    let name = non_empty(req, "filter[name]");

    let min_price = non_empty(req, "filter[minPrice]")
        .map(|value| value.parse::<Decimal>())
        .transpose()
        .or_400("filter[minPrice] must be a number")?;

    let max_price = non_empty(req, "filter[maxPrice]")
        .map(|value| value.parse::<Decimal>())
        .transpose()
        .or_400("filter[maxPrice] must be a number")?;

    let tags = req
        .queries()
        .get_vec("tags[]")
        .map(|values| {
            values
                .iter()
                .map(|value| value.parse::<TagUuid>())
                .collect::<Result<SmallVec<[TagUuid; 4]>, _>>()
        })
        .transpose()
        .or_400("tags[] must be tag ids")?
        .unwrap_or_default();

    let category = non_empty(req, "category")
        .map(|value| value.parse::<CategoryUuid>())
        .transpose()
        .or_400("category must be a category id")?;

    Ok(ProductFilter {
        name,
        min_price,
        max_price,
        free_delivery: flag(req, "filter[freeDelivery]"),
        available: flag(req, "filter[available]"),
        tags,
        category,
    })
}

/// `sortType=inc` sorts descending, anything else ascending.
fn catalog_sort(req: &Request) -> Result<Option<ProductSort>, StatusError> {
    let Some(field) = non_empty(req, "sort") else {
        return Ok(None);
    };

    let field = match field.as_str() {
        "price" => SortField::Price,
        "rating" => SortField::Rating,
        "reviews" => SortField::Reviews,
        "date" => SortField::Date,
        _ => return Err(StatusError::bad_request().brief("unknown sort field")),
    };

    let direction = if non_empty(req, "sortType").as_deref() == Some("inc") {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };

    Ok(Some(ProductSort { field, direction }))
}

fn non_empty(req: &Request, key: &str) -> Option<String> {
    req.query::<String>(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn flag(req: &Request, key: &str) -> bool {
    non_empty(req, key).is_some_and(|value| value.eq_ignore_ascii_case("true") || value == "1")
}
