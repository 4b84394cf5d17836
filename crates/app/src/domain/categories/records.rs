//! Category Records

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub title: String,
    pub active: bool,
    pub parent_uuid: Option<CategoryUuid>,
    pub favourite: bool,
    /// Icon path, when the category has one.
    pub icon_src: Option<String>,
}

/// A root category with its direct subcategories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTree {
    pub category: CategoryRecord,
    pub subcategories: Vec<CategoryRecord>,
}
