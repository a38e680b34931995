//! Get Review Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, models::ReviewResponse},
    state::State,
};

/// Get Review Handler
#[endpoint(tags("reviews"), summary = "Get Review")]
pub(crate) async fn handler(
    review: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let review = state
        .app
        .reviews
        .get_review(review.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(review.into()))
}
