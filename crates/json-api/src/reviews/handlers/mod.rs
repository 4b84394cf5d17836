//! Review Handlers

pub(crate) mod create;
