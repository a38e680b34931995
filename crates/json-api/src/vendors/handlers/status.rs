//! Vendor Status Handler

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
    vendors::{
        errors::into_status_error,
        models::{VendorResponse, parse_vendor_status},
    },
};

/// Vendor Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorStatusRequest {
    /// One of `pending`, `active`, `suspended` or `inactive`.
    pub status: String,
}

/// Vendor Status Handler
#[endpoint(
    tags("admin"),
    summary = "Set Vendor Status",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "vendors.set_status",
    skip(vendor, json, depot),
    fields(vendor_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    vendor: PathParam<Uuid>,
    json: JsonBody<VendorStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<VendorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = vendor.into_inner();
    let status = parse_vendor_status(&json.into_inner().status)?;

    let span = tracing::Span::current();

    span.record("vendor_uuid", tracing::field::display(vendor));
    span.record("status", status.as_str());

    let vendor = state
        .app
        .vendors
        .set_status(vendor.into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(vendor.into()))
}
