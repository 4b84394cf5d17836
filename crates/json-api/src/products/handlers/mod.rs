//! Product Handlers

pub(crate) mod banners;
pub(crate) mod catalog;
pub(crate) mod get;
pub(crate) mod limited;
pub(crate) mod popular;
