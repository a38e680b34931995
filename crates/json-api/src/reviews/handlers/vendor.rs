//! Vendor Reviews Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, models::ReviewsResponse},
    state::State,
};

/// Approved reviews across a vendor's catalogue, newest first.
#[endpoint(tags("reviews"), summary = "List Vendor Reviews")]
pub(crate) async fn handler(
    vendor: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ReviewsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let reviews = state
        .app
        .reviews
        .vendor_reviews(vendor.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(reviews.into()))
}
