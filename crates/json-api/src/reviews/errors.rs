//! Review Errors

use salvo::http::StatusError;
use tracing::error;

use expresskart_app::domain::reviews::ReviewsServiceError;

pub(crate) fn into_status_error(error: ReviewsServiceError) -> StatusError {
    match error {
        ReviewsServiceError::AlreadyExists => {
            StatusError::conflict().brief("You have already reviewed this product")
        }
        ReviewsServiceError::NotFound => StatusError::not_found().brief("Review not found"),
        ReviewsServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        ReviewsServiceError::InvalidRating => {
            StatusError::bad_request().brief("Rating must be between 1 and 5")
        }
        ReviewsServiceError::Forbidden => {
            StatusError::forbidden().brief("Not authorized to change this review")
        }
        ReviewsServiceError::InvalidReference
        | ReviewsServiceError::MissingRequiredData
        | ReviewsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid review payload")
        }
        ReviewsServiceError::Sql(source) => {
            error!("review storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
