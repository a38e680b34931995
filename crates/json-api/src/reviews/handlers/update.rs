//! Update Review Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    reviews::{
        errors::into_status_error,
        models::{ReviewBody, ReviewResponse},
    },
    state::State,
};

/// Rewrite one of the caller's reviews.
#[endpoint(
    tags("reviews"),
    summary = "Update Review",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "reviews.update",
    skip(review, json, depot),
    fields(user_uuid = tracing::field::Empty, review_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    review: PathParam<Uuid>,
    json: JsonBody<ReviewBody>,
    depot: &mut Depot,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let review = review.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("review_uuid", tracing::field::display(review));

    let review = state
        .app
        .reviews
        .update_review(user, review.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(review.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use expresskart_app::domain::{
        products::records::ProductUuid,
        reviews::{MockReviewsService, ReviewsServiceError, records::ReviewUuid},
        users::records::Role,
    };

    use crate::{
        reviews::models::tests::make_review,
        test_helpers::{Mocks, TEST_USER_UUID, service_as},
    };

    use super::*;

    fn make_service(reviews: MockReviewsService) -> Service {
        service_as(
            Role::User,
            Mocks {
                reviews,
                ..Mocks::default()
            },
            Router::with_path("reviews/{review}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_own_review() -> TestResult {
        let uuid = ReviewUuid::new();
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_update_review()
            .once()
            .withf(move |user, r, update| {
                *user == TEST_USER_UUID && *r == uuid && update.rating == 2 && update.title.is_none()
            })
            .return_once(move |user, _, update| {
                let mut review = make_review(uuid, user, ProductUuid::new());

                review.rating = update.rating;
                review.title = update.title;
                review.comment = update.comment;

                Ok(review)
            });

        let body: ReviewResponse = TestClient::put(format!("http://example.com/reviews/{uuid}"))
            .json(&json!({ "rating": 2, "comment": "Second batch was stale" }))
            .send(&make_service(reviews))
            .await
            .take_json()
            .await?;

        assert_eq!(body.rating, 2);
        assert_eq!(body.comment, "Second batch was stale");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_someone_elses_review_returns_403() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_update_review()
            .once()
            .return_once(|_, _, _| Err(ReviewsServiceError::Forbidden));

        let res = TestClient::put(format!("http://example.com/reviews/{}", ReviewUuid::new()))
            .json(&json!({ "rating": 1, "comment": "Sabotage" }))
            .send(&make_service(reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
