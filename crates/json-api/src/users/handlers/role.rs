//! User Role Handler

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
    users::{
        errors::into_status_error,
        models::{UserResponse, parse_role},
    },
};

/// User Role Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserRoleRequest {
    /// `user`, `vendor` or `admin`
    pub role: String,
}

/// User Role Handler
#[endpoint(
    tags("admin"),
    summary = "Set User Role",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "users.set_role",
    skip(user, json, depot),
    fields(user_uuid = tracing::field::Empty, role = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<UserRoleRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();
    let role = parse_role(&json.into_inner().role)?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("role", role.as_str());

    let updated = state
        .app
        .users
        .set_role(user.into(), role)
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
        MockUsersService,
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
            Router::with_path("admin/users/{user}/role").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_promote_to_vendor() -> TestResult {
        let uuid = UserUuid::new();
        let mut users = MockUsersService::new();

        users
            .expect_set_role()
            .once()
            .withf(move |u, role| *u == uuid && *role == Role::Vendor)
            .return_once(move |_, role| Ok(make_user(uuid, role)));

        let body: UserResponse =
            TestClient::patch(format!("http://example.com/admin/users/{uuid}/role"))
                .json(&json!({ "role": "vendor" }))
                .send(&make_service(users))
                .await
                .take_json()
                .await?;

        assert_eq!(body.role, "vendor");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_role_returns_400() -> TestResult {
        let res = TestClient::patch(format!(
            "http://example.com/admin/users/{}/role",
            UserUuid::new()
        ))
        .json(&json!({ "role": "superuser" }))
        .send(&make_service(MockUsersService::new()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
