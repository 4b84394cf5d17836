//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product request")
        }
        ProductsServiceError::Sql(source) => {
            error!("failed to query products: {source}");

            StatusError::internal_server_error()
        }
    }
}
