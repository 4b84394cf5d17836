//! Profile Records

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Profile UUID
pub type ProfileUuid = TypedUuid<ProfileRecord>;

/// Profile Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub uuid: ProfileUuid,
    pub user_uuid: UserUuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}
