//! Admin Dashboard

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::DashboardServiceError;
pub use service::*;
