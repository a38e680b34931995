//! Moderate Review Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use expresskart_app::domain::reviews::data::Moderation;

use crate::{
    extensions::*,
    reviews::{
        errors::into_status_error,
        models::{ReviewResponse, parse_review_status},
    },
    state::State,
};

/// Moderation Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ModerationRequest {
    /// `approved`, `pending` or `rejected`.
    pub status: String,
    pub note: Option<String>,
}

/// Approve or reject a review. Only approved reviews count towards ratings.
#[endpoint(
    tags("admin"),
    summary = "Moderate Review",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "reviews.moderate",
    skip(review, json, depot),
    fields(review_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    review: PathParam<Uuid>,
    json: JsonBody<ModerationRequest>,
    depot: &mut Depot,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let review = review.into_inner();
    let request = json.into_inner();
    let status = parse_review_status(&request.status)?;

    let span = tracing::Span::current();

    span.record("review_uuid", tracing::field::display(review));
    span.record("status", status.as_str());

    let review = state
        .app
        .reviews
        .moderate_review(
            review.into(),
            Moderation {
                status,
                note: request.note,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(review.into()))
}
