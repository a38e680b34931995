//! Admin Exists Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{auth::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdminExistsResponse {
    pub exists: bool,
}

/// Whether the bootstrap admin has been created
#[endpoint(tags("auth"), summary = "Admin Exists")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AdminExistsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let exists = state
        .app
        .auth
        .admin_exists()
        .await
        .map_err(into_status_error)?;

    Ok(Json(AdminExistsResponse { exists }))
}
