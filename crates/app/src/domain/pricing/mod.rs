//! Pricing

pub mod resolver;

pub use resolver::*;
