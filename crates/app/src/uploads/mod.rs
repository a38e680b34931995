//! Image uploads stored on local disk.

mod errors;
mod service;

pub use errors::UploadsError;
pub use service::*;
