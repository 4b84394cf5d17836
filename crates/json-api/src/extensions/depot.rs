//! Depot helper extensions.

use std::any::Any;

use marketplace_app::domain::{carts::session::SessionKey, users::records::UserUuid};
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_user_uuid(&mut self, user: UserUuid);

    /// The authenticated user, or 401 when the auth middleware did not run.
    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;

    fn insert_session_key(&mut self, session: SessionKey);

    fn session_key_or_500(&self) -> Result<&SessionKey, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.inject(user);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.obtain::<UserUuid>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn insert_session_key(&mut self, session: SessionKey) {
        self.inject(session);
    }

    fn session_key_or_500(&self) -> Result<&SessionKey, StatusError> {
        self.obtain_or_500::<SessionKey>()
    }
}
