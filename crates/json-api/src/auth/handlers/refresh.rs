//! Refresh Token Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{errors::into_status_error, models::SessionResponse},
    extensions::*,
    state::State,
};

/// Refresh Token Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Rotate a session's tokens. The presented refresh token stops working.
#[endpoint(
    tags("auth"),
    summary = "Refresh Token",
    responses(
        (status_code = StatusCode::OK, description = "New token pair"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid or expired refresh token"),
    ),
)]
#[tracing::instrument(name = "auth.refresh", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<RefreshTokenRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .auth
        .refresh(&json.into_inner().refresh_token)
        .await
        .map_err(into_status_error)?;

    Ok(Json(session.into()))
}
