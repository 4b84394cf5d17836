//! Category Handlers

pub(crate) mod index;
