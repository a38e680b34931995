//! Remove Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Soft delete any vendor's product.
#[endpoint(
    tags("admin"),
    summary = "Remove Product",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "products.remove",
    skip(product, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    state
        .app
        .products
        .remove_product(product.into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
