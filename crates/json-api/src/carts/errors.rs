//! Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Count must be a positive integer")
        }
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::Products(source) => {
            error!("failed to load cart products: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Store(source) => {
            error!("failed to access session store: {source}");

            StatusError::internal_server_error()
        }
    }
}
