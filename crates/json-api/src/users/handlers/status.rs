//! User Status Handler

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

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// User Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserStatusRequest {
    pub is_active: bool,
}

/// Activate or deactivate an account. Deactivated users cannot sign in and
/// their tokens stop working.
#[endpoint(
    tags("admin"),
    summary = "Set User Status",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "users.set_active",
    skip(user, json, depot),
    fields(user_uuid = tracing::field::Empty, is_active = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<UserStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();
    let is_active = json.into_inner().is_active;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("is_active", is_active);

    let updated = state
        .app
        .users
        .set_active(user.into(), is_active)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
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
            Router::with_path("admin/users/{user}/status").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_deactivate_user() -> TestResult {
        let uuid = UserUuid::new();
        let mut users = MockUsersService::new();

        users
            .expect_set_active()
            .once()
            .withf(move |u, is_active| *u == uuid && !*is_active)
            .return_once(move |_, is_active| {
                let mut user = make_user(uuid, Role::User);

                user.is_active = is_active;

                Ok(user)
            });

        let body: UserResponse =
            TestClient::patch(format!("http://example.com/admin/users/{uuid}/status"))
                .json(&json!({ "is_active": false }))
                .send(&make_service(users))
                .await
                .take_json()
                .await?;

        assert!(!body.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_user_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_set_active()
            .once()
            .return_once(|_, _| Err(UsersServiceError::NotFound));

        let res = TestClient::patch(format!(
            "http://example.com/admin/users/{}/status",
            UserUuid::new()
        ))
        .json(&json!({ "is_active": true }))
        .send(&make_service(users))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
