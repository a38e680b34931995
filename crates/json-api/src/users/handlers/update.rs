//! Update User Handler

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

use expresskart_app::domain::users::data::UserUpdate;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// Update User Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateUserRequest {
    pub name: String,
    pub phone: Option<String>,

    #[serde(default)]
    pub is_email_verified: bool,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            name: request.name,
            phone: request.phone,
            is_email_verified: request.is_email_verified,
        }
    }
}

/// Update User Handler
#[endpoint(
    tags("admin"),
    summary = "Update User",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "users.update",
    skip(user, json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let updated = state
        .app
        .users
        .update_user(user.into(), json.into_inner().into())
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
            Router::with_path("admin/users/{user}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_user() -> TestResult {
        let uuid = UserUuid::new();
        let mut users = MockUsersService::new();

        users
            .expect_update_user()
            .once()
            .withf(move |u, update| {
                *u == uuid
                    && update.name == "Asha Rao"
                    && update.phone.as_deref() == Some("9876543210")
                    && update.is_email_verified
            })
            .return_once(move |_, update| {
                let mut user = make_user(uuid, Role::User);

                user.name = update.name;
                user.phone = update.phone;
                user.is_email_verified = update.is_email_verified;

                Ok(user)
            });

        let body: UserResponse = TestClient::put(format!("http://example.com/admin/users/{uuid}"))
            .json(&json!({
                "name": "Asha Rao",
                "phone": "9876543210",
                "is_email_verified": true
            }))
            .send(&make_service(users))
            .await
            .take_json()
            .await?;

        assert_eq!(body.name, "Asha Rao");
        assert!(body.is_email_verified);

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_name_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_update_user()
            .once()
            .return_once(|_, _| Err(UsersServiceError::MissingRequiredData));

        let res = TestClient::put(format!("http://example.com/admin/users/{}", UserUuid::new()))
            .json(&json!({ "name": "  " }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
