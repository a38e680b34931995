//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use expresskart_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::PriceAboveMrp => {
            StatusError::bad_request().brief("Selling price cannot be greater than MRP")
        }
        ProductsServiceError::NoVendorProfile => {
            StatusError::forbidden().brief("Create a vendor profile before listing products")
        }
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
