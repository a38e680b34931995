//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::carts::pricing::InvalidDiscountCode;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("item is not in the cart")]
    NotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("insufficient stock")]
    InsufficientStock,

    #[error(transparent)]
    InvalidDiscountCode(#[from] InvalidDiscountCode),

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if matches!(error, Error::Encode(_)) {
            return Self::InvalidData;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::ProductNotFound,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
