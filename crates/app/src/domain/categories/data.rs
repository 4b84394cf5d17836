//! Categories Data

use crate::domain::categories::records::CategoryUuid;

/// New Category Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub title: String,
    pub active: bool,
    pub parent_uuid: Option<CategoryUuid>,
    pub favourite: bool,
    pub icon_src: Option<String>,
}

impl NewCategory {
    /// An active root category without an icon.
    #[must_use]
    pub fn active(title: impl Into<String>) -> Self {
        Self {
            uuid: CategoryUuid::new(),
            title: title.into(),
            active: true,
            parent_uuid: None,
            favourite: false,
            icon_src: None,
        }
    }
}
