//! Tag Records

use crate::uuids::TypedUuid;

/// Tag UUID
pub type TagUuid = TypedUuid<TagRecord>;

/// Tag Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub uuid: TagUuid,
    pub name: String,
}
