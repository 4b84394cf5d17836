//! Carts

pub mod errors;
pub mod records;
pub mod session;
pub mod service;
pub mod store;

pub use errors::{CartsServiceError, SessionStoreError};
pub use service::*;
pub use store::*;
