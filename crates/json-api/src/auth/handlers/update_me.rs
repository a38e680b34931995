//! Update Current User Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use expresskart_app::domain::users::data::ProfileUpdate;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// Update Profile Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateMeRequest {
    pub name: String,
    pub phone: Option<String>,
}

impl From<UpdateMeRequest> for ProfileUpdate {
    fn from(request: UpdateMeRequest) -> Self {
        ProfileUpdate {
            name: request.name,
            phone: request.phone,
        }
    }
}

/// Change the signed-in user's name and phone
#[endpoint(tags("auth"), summary = "Update Current User", security(("bearer_auth" = [])))]
#[tracing::instrument(
    name = "auth.update_me",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateMeRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let user = state
        .app
        .users
        .update_profile(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
