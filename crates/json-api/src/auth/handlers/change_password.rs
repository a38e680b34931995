//! Change Password Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Change Password Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Change Password Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChangePasswordResponse {
    pub message: String,
}

/// Change the caller's password. Every other session is signed out.
#[endpoint(
    tags("auth"),
    summary = "Change Password",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Password changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Current password is incorrect"),
    ),
)]
#[tracing::instrument(
    name = "auth.change_password",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ChangePasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<ChangePasswordResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    tracing::Span::current().record("user_uuid", tracing::field::display(principal.user_uuid));

    state
        .app
        .auth
        .change_password(principal, &request.current_password, &request.new_password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ChangePasswordResponse {
        message: "Password changed successfully".to_string(),
    }))
}
