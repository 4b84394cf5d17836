//! Tags service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::impl_from_sqlx_error;

#[derive(Debug, Error)]
pub enum TagsServiceError {
    #[error("tag already exists")]
    AlreadyExists,

    #[error("tag not found")]
    NotFound,

    #[error("tag or product not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl_from_sqlx_error!(TagsServiceError);
