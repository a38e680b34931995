//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use expresskart_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Item not found in cart"),
        CartsServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        CartsServiceError::InsufficientStock => {
            StatusError::bad_request().brief("Insufficient stock")
        }
        CartsServiceError::InvalidDiscountCode(code) => {
            StatusError::bad_request().brief(code.to_string())
        }
        CartsServiceError::InvalidData => StatusError::bad_request().brief("Invalid cart payload"),
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
