//! Upload Errors

use salvo::http::StatusError;
use tracing::error;

use expresskart_app::uploads::UploadsError;

pub(crate) fn into_status_error(error: UploadsError) -> StatusError {
    match error {
        UploadsError::UnsupportedType(_) => {
            StatusError::bad_request().brief("Only JPEG, PNG, WebP and GIF images are allowed")
        }
        UploadsError::TooLarge { .. } | UploadsError::Empty | UploadsError::InvalidId => {
            StatusError::bad_request().brief(error.to_string())
        }
        UploadsError::NotFound => StatusError::not_found().brief("File not found"),
        UploadsError::Io(source) => {
            error!("upload storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
