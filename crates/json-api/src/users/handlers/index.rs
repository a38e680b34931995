//! List Users Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    state::State,
    users::{
        errors::into_status_error,
        models::{UsersResponse, parse_role},
    },
};

/// List Users Handler
///
/// Newest first, optionally restricted to one role.
#[endpoint(
    tags("admin"),
    summary = "List Users",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    role: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let role = role.into_inner().as_deref().map(parse_role).transpose()?;

    let users = state
        .app
        .users
        .list_users(role)
        .await
        .map_err(into_status_error)?;

    Ok(Json(users.into()))
}
