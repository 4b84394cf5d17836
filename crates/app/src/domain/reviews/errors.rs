//! Reviews service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::impl_from_sqlx_error;

#[derive(Debug, Error)]
pub enum ReviewsServiceError {
    #[error("rate {0} is outside 1..=5")]
    InvalidRate(u8),

    #[error("review already exists")]
    AlreadyExists,

    #[error("review not found")]
    NotFound,

    #[error("product not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl_from_sqlx_error!(ReviewsServiceError);
