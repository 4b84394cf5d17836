//! Tags

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::TagsServiceError;
pub use service::*;
