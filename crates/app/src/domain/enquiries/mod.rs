//! Enquiries

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::EnquiriesServiceError;
pub use service::*;
