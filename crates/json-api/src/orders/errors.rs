//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use expresskart_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Not authorized to access this order")
        }
        OrdersServiceError::InvalidTransition { from, to } => StatusError::conflict()
            .brief("Invalid order status transition")
            .detail(format!("cannot move order from {from} to {to}")),
        OrdersServiceError::EmptyCart
        | OrdersServiceError::InsufficientStock(_)
        | OrdersServiceError::BelowMinimumOrder { .. }
        | OrdersServiceError::InvalidDiscountCode(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
