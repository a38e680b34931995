//! Related Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductsResponse},
    state::State,
};

/// Other active products in the same category.
#[endpoint(tags("products"), summary = "Related Products")]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .related_products(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}
