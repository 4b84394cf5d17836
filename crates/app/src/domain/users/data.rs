//! Users Data

use crate::domain::users::records::UserUuid;

/// New User Data, with the contact details of its profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl NewUser {
    /// A user with an empty profile.
    #[must_use]
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            uuid: UserUuid::new(),
            username: username.into(),
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
        }
    }
}
