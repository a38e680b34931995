//! My Reviews Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, models::ReviewsResponse},
    state::State,
};

/// The caller's reviews in every moderation state.
#[endpoint(
    tags("reviews"),
    summary = "List My Reviews",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ReviewsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let reviews = state
        .app
        .reviews
        .my_reviews(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(reviews.into()))
}
