//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use expresskart_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid credentials")
        }
        AuthServiceError::AccountDisabled => {
            StatusError::forbidden().brief("Account is deactivated")
        }
        AuthServiceError::InvalidToken => {
            StatusError::unauthorized().brief("Invalid or expired token")
        }
        AuthServiceError::EmailTaken => {
            StatusError::conflict().brief("User already exists with this email")
        }
        AuthServiceError::AdminExists => StatusError::conflict().brief("Admin already exists"),
        AuthServiceError::IncorrectPassword => {
            StatusError::bad_request().brief("Current password is incorrect")
        }
        AuthServiceError::Validation(message) => StatusError::bad_request().brief(message),
        AuthServiceError::Password(source) => {
            error!("password hashing failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Expiry(source) => {
            error!("session expiry out of range: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
