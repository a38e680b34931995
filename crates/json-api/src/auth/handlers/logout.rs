//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Revoke the caller's session
#[endpoint(
    tags("auth"),
    summary = "Logout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Session revoked"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    state
        .app
        .auth
        .logout(principal.session_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
