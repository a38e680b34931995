//! User Errors

use salvo::http::StatusError;
use tracing::error;

use expresskart_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("User already exists with this email")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::InvalidReference => {
            StatusError::conflict().brief("User still has vendors, orders or reviews")
        }
        UsersServiceError::MissingRequiredData | UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid user payload")
        }
        UsersServiceError::Sql(source) => {
            error!("user storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
