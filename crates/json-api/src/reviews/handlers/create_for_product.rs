//! Create Product Review Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use expresskart_app::domain::reviews::data::NewReview;

use crate::{
    extensions::*,
    reviews::models::{ReviewBody, ReviewResponse},
    state::State,
};

use super::create::create_review;

/// Review the product named in the path.
#[endpoint(
    tags("reviews"),
    summary = "Create Product Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review created"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Already reviewed"),
    ),
)]
#[tracing::instrument(
    name = "reviews.create",
    skip(product, json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        review_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ReviewBody>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let body = json.into_inner();

    let review = NewReview {
        product_uuid: product.into_inner().into(),
        rating: body.rating,
        title: body.title,
        comment: body.comment,
    };

    create_review(state, user, review, res).await
}
