//! Upload errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadsError {
    #[error("unsupported file type {0:?}")]
    UnsupportedType(String),

    #[error("file is {size} bytes, the limit is {max}")]
    TooLarge { size: u64, max: u64 },

    #[error("file is empty")]
    Empty,

    #[error("invalid upload id")]
    InvalidId,

    #[error("upload not found")]
    NotFound,

    #[error("upload storage error")]
    Io(#[from] std::io::Error),
}
