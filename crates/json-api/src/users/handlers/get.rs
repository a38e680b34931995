//! Get User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// Get User Handler
#[endpoint(
    tags("admin"),
    summary = "Get User",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .get_user(user.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use expresskart_app::domain::users::{
        MockUsersService, UsersServiceError,
        records::{Role, UserUuid},
    };

    use crate::test_helpers::{Mocks, service_as};

    use super::{super::tests::make_user, *};

    fn make_service(users: MockUsersService) -> Service {
        service_as(
            Role::Admin,
            Mocks {
                users,
                ..Mocks::default()
            },
            Router::with_path("admin/users/{user}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_returns_200() -> TestResult {
        let uuid = UserUuid::new();
        let mut users = MockUsersService::new();

        users
            .expect_get_user()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(make_user(uuid, Role::User)));

        let res = TestClient::get(format!("http://example.com/admin/users/{uuid}"))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_user_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_get_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/admin/users/{}", UserUuid::new()))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
