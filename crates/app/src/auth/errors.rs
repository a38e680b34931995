//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::passwords::PasswordError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account is deactivated")]
    AccountDisabled,

    #[error("token is invalid or expired")]
    InvalidToken,

    #[error("email is already registered")]
    EmailTaken,

    #[error("an admin account already exists")]
    AdminExists,

    #[error("current password is incorrect")]
    IncorrectPassword,

    #[error("invalid registration: {0}")]
    Validation(&'static str),

    #[error("password processing error")]
    Password(#[from] PasswordError),

    #[error("token expiry is out of range")]
    Expiry(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::EmailTaken,
            Some(ErrorKind::CheckViolation) => Self::Validation("invalid field value"),
            _ => Self::Sql(error),
        }
    }
}
