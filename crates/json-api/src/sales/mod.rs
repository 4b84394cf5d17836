//! Sales

mod handlers;

pub(crate) use handlers::*;
