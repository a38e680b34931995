//! Admin Review List Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use expresskart_app::domain::reviews::records::ReviewStatus;

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, models::ReviewsResponse},
    state::State,
};

/// Admin Review List Handler
#[endpoint(
    tags("admin"),
    summary = "List All Reviews",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ReviewsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status = status.parse_or_400::<ReviewStatus>("status")?;

    let reviews = state
        .app
        .reviews
        .list_reviews(status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(reviews.into()))
}
