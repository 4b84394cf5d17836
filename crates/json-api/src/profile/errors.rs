//! Profile Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::profiles::ProfilesServiceError;

pub(crate) fn into_status_error(error: ProfilesServiceError) -> StatusError {
    match error {
        ProfilesServiceError::NotFound => StatusError::not_found().brief("Profile not found"),
        // The authenticated user has vanished since the token was checked.
        ProfilesServiceError::InvalidReference => StatusError::unauthorized(),
        ProfilesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Profile already exists")
        }
        ProfilesServiceError::MissingRequiredData | ProfilesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid profile payload")
        }
        ProfilesServiceError::Sql(source) => {
            error!("failed to process profile: {source}");

            StatusError::internal_server_error()
        }
    }
}
