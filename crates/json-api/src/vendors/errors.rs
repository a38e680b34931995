//! Vendor Errors

use salvo::http::StatusError;
use tracing::error;

use expresskart_app::domain::vendors::VendorsServiceError;

pub(crate) fn into_status_error(error: VendorsServiceError) -> StatusError {
    match error {
        VendorsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Vendor profile already exists")
        }
        VendorsServiceError::NotFound => StatusError::not_found().brief("Vendor not found"),
        VendorsServiceError::InvalidReference => {
            StatusError::conflict().brief("Vendor still has products or orders")
        }
        VendorsServiceError::MissingRequiredData | VendorsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid vendor payload")
        }
        VendorsServiceError::Sql(source) => {
            error!("vendor storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// As [`into_status_error`], worded for the caller's own profile.
pub(crate) fn profile_status_error(error: VendorsServiceError) -> StatusError {
    match error {
        VendorsServiceError::NotFound => {
            StatusError::not_found().brief("Vendor profile not found")
        }
        other => into_status_error(other),
    }
}
