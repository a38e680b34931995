//! Product Reviews Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, models::ReviewsResponse},
    state::State,
};

/// Approved reviews of a product, newest first.
#[endpoint(tags("reviews"), summary = "List Product Reviews")]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ReviewsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let reviews = state
        .app
        .reviews
        .product_reviews(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(reviews.into()))
}
