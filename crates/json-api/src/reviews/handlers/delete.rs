//! Delete Review Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, reviews::errors::into_status_error, state::State};

/// Remove a review. Allowed for its author and for admins.
#[endpoint(
    tags("reviews"),
    summary = "Delete Review",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "reviews.delete",
    skip(review, depot),
    fields(user_uuid = tracing::field::Empty, review_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    review: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let review = review.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user_uuid));
    span.record("review_uuid", tracing::field::display(review));

    state
        .app
        .reviews
        .delete_review(principal, review.into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use expresskart_app::domain::{
        reviews::{MockReviewsService, ReviewsServiceError, records::ReviewUuid},
        users::records::Role,
    };

    use crate::test_helpers::{Mocks, service_as};

    use super::*;

    fn make_service(role: Role, reviews: MockReviewsService) -> Service {
        service_as(
            role,
            Mocks {
                reviews,
                ..Mocks::default()
            },
            Router::with_path("reviews/{review}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_admin_deletes_any_review() -> TestResult {
        let uuid = ReviewUuid::new();
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_delete_review()
            .once()
            .withf(move |principal, r| principal.role == Role::Admin && *r == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/reviews/{uuid}"))
            .send(&make_service(Role::Admin, reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_stranger_cannot_delete() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_delete_review()
            .once()
            .return_once(|_, _| Err(ReviewsServiceError::Forbidden));

        let res = TestClient::delete(format!("http://example.com/reviews/{}", ReviewUuid::new()))
            .send(&make_service(Role::User, reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
