//! Get Vendor Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    vendors::{errors::into_status_error, models::VendorResponse},
};

/// Get Vendor Handler
#[endpoint(tags("vendors"), summary = "Get Vendor")]
pub(crate) async fn handler(
    vendor: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<VendorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let vendor = state
        .app
        .vendors
        .get_vendor(vendor.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(vendor.into()))
}
