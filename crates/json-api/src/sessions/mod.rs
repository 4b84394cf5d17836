//! Visitor sessions

pub(crate) mod middleware;
pub(crate) mod purge;
