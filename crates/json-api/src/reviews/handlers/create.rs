//! Create Review Handler

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

use marketplace_app::domain::reviews::{data::NewReview, records::ReviewRecord};

use crate::{extensions::*, reviews::errors::into_status_error, state::State};

/// Review dates are shown as `day.month.year hours:minutes`, UTC.
const REVIEW_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Create Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateReviewRequest {
    pub author: String,

    pub email: String,

    pub text: String,

    /// 1 to 5
    pub rate: u8,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        NewReview::new(request.author, request.email, request.text, request.rate)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewResponse {
    pub author: String,

    pub email: String,

    pub text: String,

    pub rate: u8,

    pub date: String,

    /// The reviewed product
    pub product: Uuid,
}

impl From<ReviewRecord> for ReviewResponse {
    fn from(review: ReviewRecord) -> Self {
        Self {
            author: review.author,
            email: review.email,
            text: review.text,
            rate: review.rate,
            date: review.created_at.strftime(REVIEW_DATE_FORMAT).to_string(),
            product: review.product_uuid.into_uuid(),
        }
    }
}

/// Create Review Handler
///
/// Records a review and returns every review of the product.
#[endpoint(
    tags("catalog"),
    summary = "Review Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review created"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Vec<ReviewResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_uuid_or_401()?;

    let reviews = state
        .app
        .reviews
        .create_review(product.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}
