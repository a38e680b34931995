//! Carts

pub mod errors;
pub mod pricing;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
