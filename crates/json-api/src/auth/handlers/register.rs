//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use expresskart_app::{auth::Registration, domain::users::records::Role};

use crate::{
    auth::{errors::into_status_error, models::AuthResponse},
    extensions::*,
    state::State,
    users::models::parse_role,
};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,

    /// `user` (default) or `vendor`
    pub role: Option<String>,
}

impl RegisterRequest {
    fn into_registration(self) -> Result<Registration, StatusError> {
        let role = match self.role.as_deref() {
            None => Role::User,
            Some(role) => parse_role(role)?,
        };

        Ok(Registration {
            name: self.name,
            email: self.email,
            password: self.password,
            phone: self.phone,
            role,
        })
    }
}

/// Register Handler
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created and signed in"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(
    name = "auth.register",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, role = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AuthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let registration = json.into_inner().into_registration()?;

    let authenticated = state
        .app
        .auth
        .register(registration)
        .await
        .map_err(into_status_error)?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(authenticated.user.uuid));
    span.record("role", authenticated.user.role.as_str());

    res.status_code(StatusCode::CREATED);

    Ok(Json(authenticated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use expresskart_app::auth::{AuthServiceError, MockAuthService};

    use crate::{
        auth::models::tests::make_authenticated,
        test_helpers::{Mocks, public_service},
    };

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        public_service(
            Mocks {
                auth,
                ..Mocks::default()
            },
            Router::with_path("auth/register").post(handler),
        )
    }

    #[tokio::test]
    async fn test_register_vendor_returns_201() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .withf(|registration| {
                registration.role == Role::Vendor && registration.email == "shop@example.com"
            })
            .return_once(|_| Ok(make_authenticated(Role::Vendor)));

        let mut res = TestClient::post("http://example.com/auth/register")
            .json(&json!({
                "name": "Shop",
                "email": "shop@example.com",
                "password": "secret1",
                "role": "vendor"
            }))
            .send(&make_service(auth))
            .await;

        let body: AuthResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.user.role, "vendor");
        assert_eq!(body.session.access_token, "eka_v1_access");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_defaults_to_user_role() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .withf(|registration| registration.role == Role::User)
            .return_once(|_| Ok(make_authenticated(Role::User)));

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({ "name": "Asha", "email": "asha@example.com", "password": "secret1" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_email_returns_409() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .return_once(|_| Err(AuthServiceError::EmailTaken));

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({ "name": "Asha", "email": "asha@example.com", "password": "secret1" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_as_admin_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .withf(|registration| registration.role == Role::Admin)
            .return_once(|_| Err(AuthServiceError::Validation("role must be user or vendor")));

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({
                "name": "Mallory",
                "email": "m@example.com",
                "password": "secret1",
                "role": "admin"
            }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
