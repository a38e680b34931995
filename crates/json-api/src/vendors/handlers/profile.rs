//! Own Vendor Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    vendors::{errors::profile_status_error, models::VendorResponse},
};

/// Own Vendor Profile Handler
#[endpoint(
    tags("vendors"),
    summary = "Get Own Vendor Profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<VendorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let vendor = state
        .app
        .vendors
        .get_profile(user)
        .await
        .map_err(profile_status_error)?;

    Ok(Json(vendor.into()))
}
