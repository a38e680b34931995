//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use expresskart_app::domain::products::data::ProductDetails;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{ProductRequest, ProductResponse},
    },
    state::State,
};

/// Replace one of the caller's products. Other vendors' products are not
/// found.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(user_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let product = product.into_inner();
    let details = ProductDetails::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(product));

    let product = state
        .app
        .products
        .update_product(user, product.into(), details)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
