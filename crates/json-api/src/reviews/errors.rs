//! Review Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::reviews::ReviewsServiceError;

pub(crate) fn into_status_error(error: ReviewsServiceError) -> StatusError {
    match error {
        ReviewsServiceError::InvalidRate(rate) => {
            StatusError::bad_request().brief(format!("Rate {rate} is outside 1..5"))
        }
        ReviewsServiceError::InvalidReference | ReviewsServiceError::NotFound => {
            StatusError::not_found().brief("Product not found")
        }
        ReviewsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Review already exists")
        }
        ReviewsServiceError::MissingRequiredData | ReviewsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid review payload")
        }
        ReviewsServiceError::Sql(source) => {
            error!("failed to process reviews: {source}");

            StatusError::internal_server_error()
        }
    }
}
