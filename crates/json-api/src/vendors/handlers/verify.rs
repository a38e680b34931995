//! Verify Vendor Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    vendors::{errors::into_status_error, models::VendorResponse},
};

/// Verify Vendor Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyVendorRequest {
    pub is_verified: bool,
}

/// Mark a vendor verified. Verification also activates a pending vendor.
#[endpoint(
    tags("admin"),
    summary = "Verify Vendor",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "vendors.set_verified",
    skip(vendor, json, depot),
    fields(vendor_uuid = tracing::field::Empty, is_verified = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    vendor: PathParam<Uuid>,
    json: JsonBody<VerifyVendorRequest>,
    depot: &mut Depot,
) -> Result<Json<VendorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = vendor.into_inner();
    let is_verified = json.into_inner().is_verified;

    let span = tracing::Span::current();

    span.record("vendor_uuid", tracing::field::display(vendor));
    span.record("is_verified", is_verified);

    let vendor = state
        .app
        .vendors
        .set_verified(vendor.into(), is_verified)
        .await
        .map_err(into_status_error)?;

    Ok(Json(vendor.into()))
}
