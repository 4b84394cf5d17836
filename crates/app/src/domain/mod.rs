//! Marketplace Domain Concerns

pub mod carts;
pub mod categories;
pub mod orders;
pub mod pricing;
pub mod products;
pub mod profiles;
pub mod reviews;
pub mod sales;
pub mod tags;
pub mod users;
