//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Soft delete one of the caller's products.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "products.delete",
    skip(product, depot),
    fields(user_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(product));

    state
        .app
        .products
        .delete_product(user, product.into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
