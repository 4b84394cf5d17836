//! Sale Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::sales::records::SaleRecord;

use crate::{
    extensions::*, money::format_money, products::responses::ImageResponse, state::State,
};

/// Sale dates are shown as `day.month-abbreviation`, e.g. `05.Jun`.
const SALE_DATE_FORMAT: &str = "%d.%b";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaleResponse {
    pub id: Uuid,

    /// The discounted product
    pub product: Uuid,

    /// List price of the product
    pub price: String,

    pub sale_price: String,

    pub date_from: String,

    pub date_to: Option<String>,

    pub title: String,

    /// Product page link
    pub href: String,

    pub images: Vec<ImageResponse>,
}

impl From<SaleRecord> for SaleResponse {
    fn from(sale: SaleRecord) -> Self {
        let product = sale.product_uuid.into_uuid();

        Self {
            id: sale.uuid.into_uuid(),
            product,
            price: format_money(sale.product_price),
            sale_price: format_money(sale.sale_price),
            date_from: sale.date_from.strftime(SALE_DATE_FORMAT).to_string(),
            date_to: sale
                .date_to
                .map(|date| date.strftime(SALE_DATE_FORMAT).to_string()),
            title: sale.product_title,
            href: format!("/product/{product}"),
            images: sale.images.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SalesResponse {
    pub items: Vec<SaleResponse>,
}

/// Sale Index Handler
///
/// Returns every sale with its product's title, list price and images.
#[endpoint(tags("catalog"), summary = "List Sales")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SalesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let sales = state
        .app
        .sales
        .list_sales()
        .await
        .or_500("failed to fetch sales")?;

    Ok(Json(SalesResponse {
        items: sales.into_iter().map(Into::into).collect(),
    }))
}
