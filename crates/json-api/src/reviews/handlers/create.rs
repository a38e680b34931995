//! Create Review Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use expresskart_app::domain::{
    reviews::data::NewReview, users::records::UserUuid,
};

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, models::ReviewResponse},
    state::State,
};

/// Create Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateReviewRequest {
    pub product_uuid: Uuid,

    /// 1 to 5.
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        Self {
            product_uuid: request.product_uuid.into(),
            rating: request.rating,
            title: request.title,
            comment: request.comment,
        }
    }
}

/// Post a review on behalf of `user` and answer with 201.
pub(super) async fn create_review(
    state: &State,
    user: UserUuid,
    review: NewReview,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, StatusError> {
    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(review.product_uuid));

    let review = state
        .app
        .reviews
        .create_review(user, review)
        .await
        .map_err(into_status_error)?;

    span.record("review_uuid", tracing::field::display(review.uuid));

    res.status_code(StatusCode::CREATED);

    Ok(Json(review.into()))
}

/// Review a product. One review per user and product.
#[endpoint(
    tags("reviews"),
    summary = "Create Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid rating or empty comment"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Already reviewed"),
    ),
)]
#[tracing::instrument(
    name = "reviews.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        review_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    create_review(state, user, json.into_inner().into(), res).await
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
            Router::with_path("reviews").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_review_returns_201() -> TestResult {
        let product = ProductUuid::new();
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_create_review()
            .once()
            .withf(move |user, review| {
                *user == TEST_USER_UUID && review.product_uuid == product && review.rating == 4
            })
            .return_once(move |user, _| Ok(make_review(ReviewUuid::new(), user, product)));

        let mut res = TestClient::post("http://example.com/reviews")
            .json(&json!({
                "product_uuid": product.into_uuid(),
                "rating": 4,
                "comment": "Arrived quickly and well packed"
            }))
            .send(&make_service(reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: ReviewResponse = res.take_json().await?;

        assert!(body.is_verified_purchase);

        Ok(())
    }

    #[tokio::test]
    async fn test_rating_out_of_range_returns_400() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_create_review()
            .once()
            .return_once(|_, _| Err(ReviewsServiceError::InvalidRating));

        let res = TestClient::post("http://example.com/reviews")
            .json(&json!({
                "product_uuid": ProductUuid::new().into_uuid(),
                "rating": 6,
                "comment": "Too good"
            }))
            .send(&make_service(reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_second_review_returns_409() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_create_review()
            .once()
            .return_once(|_, _| Err(ReviewsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/reviews")
            .json(&json!({
                "product_uuid": ProductUuid::new().into_uuid(),
                "rating": 3,
                "comment": "Again"
            }))
            .send(&make_service(reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
