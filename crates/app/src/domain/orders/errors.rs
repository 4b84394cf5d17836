//! Orders service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::impl_from_sqlx_error;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("an order needs at least one line")]
    EmptyOrder,

    #[error("line quantities must be positive and fit the stored range")]
    InvalidQuantity,

    #[error("profile not found")]
    ProfileNotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl_from_sqlx_error!(OrdersServiceError);
