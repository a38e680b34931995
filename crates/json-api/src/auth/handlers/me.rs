//! Current User Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// The signed-in user's profile
#[endpoint(tags("auth"), summary = "Current User", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let user = state
        .app
        .users
        .get_user(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
