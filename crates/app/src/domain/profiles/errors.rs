//! Profiles service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::impl_from_sqlx_error;

#[derive(Debug, Error)]
pub enum ProfilesServiceError {
    #[error("profile already exists")]
    AlreadyExists,

    #[error("profile not found")]
    NotFound,

    #[error("user not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl_from_sqlx_error!(ProfilesServiceError);
