//! Reviews

pub(crate) mod errors;
mod handlers;

pub(crate) use handlers::*;
pub(crate) use handlers::create::ReviewResponse;
