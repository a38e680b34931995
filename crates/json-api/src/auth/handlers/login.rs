//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{errors::into_status_error, models::AuthResponse},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::FORBIDDEN, description = "Account is deactivated"),
    ),
)]
#[tracing::instrument(
    name = "auth.login",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<AuthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let authenticated = state
        .app
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record(
        "user_uuid",
        tracing::field::display(authenticated.user.uuid),
    );

    Ok(Json(authenticated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use expresskart_app::{
        auth::{AuthServiceError, MockAuthService},
        domain::users::records::Role,
    };

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
            Router::with_path("auth/login").post(handler),
        )
    }

    async fn login(auth: MockAuthService) -> Option<StatusCode> {
        TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "asha@example.com", "password": "secret1" }))
            .send(&make_service(auth))
            .await
            .status_code
    }

    #[tokio::test]
    async fn test_login_success() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|email, password| email == "asha@example.com" && password == "secret1")
            .return_once(|_, _| Ok(make_authenticated(Role::User)));

        assert_eq!(login(auth).await, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_bad_credentials_return_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_, _| Err(AuthServiceError::InvalidCredentials));

        assert_eq!(login(auth).await, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_deactivated_account_returns_403() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_, _| Err(AuthServiceError::AccountDisabled));

        assert_eq!(login(auth).await, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
