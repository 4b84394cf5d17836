//! Tags Data

use crate::domain::tags::records::TagUuid;

/// New Tag Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub uuid: TagUuid,
    pub name: String,
}

impl NewTag {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            uuid: TagUuid::new(),
            name: name.into(),
        }
    }
}
