//! Create Admin Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use expresskart_app::auth::NewAdmin;

use crate::{
    auth::{errors::into_status_error, models::AuthResponse},
    extensions::*,
    state::State,
};

/// Create Admin Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<CreateAdminRequest> for NewAdmin {
    fn from(request: CreateAdminRequest) -> Self {
        NewAdmin {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Bootstrap the first admin account. Refused once any admin exists.
#[endpoint(
    tags("auth"),
    summary = "Create Admin",
    responses(
        (status_code = StatusCode::CREATED, description = "Admin created"),
        (status_code = StatusCode::CONFLICT, description = "Admin already exists"),
    ),
)]
#[tracing::instrument(name = "auth.create_admin", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<CreateAdminRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AuthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let authenticated = state
        .app
        .auth
        .create_admin(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %authenticated.user.uuid, "created bootstrap admin");

    res.status_code(StatusCode::CREATED);

    Ok(Json(authenticated.into()))
}
