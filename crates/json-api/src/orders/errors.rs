//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyOrder => {
            StatusError::bad_request().brief("An order needs at least one line")
        }
        OrdersServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Counts must be positive integers no larger than 2147483647")
        }
        OrdersServiceError::ProfileNotFound => StatusError::not_found().brief("Profile not found"),
        OrdersServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("failed to process order: {source}");

            StatusError::internal_server_error()
        }
    }
}
