//! Enquiry Errors

use salvo::http::StatusError;
use tracing::error;
use uuid::Uuid;

use expresskart_app::domain::enquiries::EnquiriesServiceError;

pub(crate) fn into_status_error(error: EnquiriesServiceError) -> StatusError {
    match error {
        EnquiriesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Enquiry already exists")
        }
        EnquiriesServiceError::NotFound => StatusError::not_found().brief("Enquiry not found"),
        EnquiriesServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Please provide all required fields")
        }
        EnquiriesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid enquiry payload")
        }
        EnquiriesServiceError::Sql(source) => {
            error!("enquiry storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Like [`into_status_error`], naming `enquiry` when it does not exist.
pub(crate) fn for_enquiry(enquiry: Uuid) -> impl FnOnce(EnquiriesServiceError) -> StatusError {
    move |error| match error {
        EnquiriesServiceError::NotFound => {
            StatusError::not_found().brief(format!("No enquiry found with id of {enquiry}"))
        }
        other => into_status_error(other),
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_fields_are_a_bad_request() {
        let error = into_status_error(EnquiriesServiceError::MissingRequiredData);

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, "Please provide all required fields");
    }

    #[test]
    fn not_found_names_the_enquiry() {
        let uuid = Uuid::from_u128(0x42);
        let error = for_enquiry(uuid)(EnquiriesServiceError::NotFound);

        assert_eq!(error.code, StatusCode::NOT_FOUND);
        assert_eq!(error.brief, format!("No enquiry found with id of {uuid}"));
    }
}
