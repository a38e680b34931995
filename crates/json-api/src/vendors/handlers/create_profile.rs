//! Create Vendor Profile Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use expresskart_app::domain::vendors::data::VendorProfile;

use crate::{
    extensions::*,
    state::State,
    vendors::{
        errors::into_status_error,
        models::{VendorProfileRequest, VendorResponse},
    },
};

/// Create the caller's storefront. New vendors start pending and unverified.
#[endpoint(
    tags("vendors"),
    summary = "Create Vendor Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 201, description = "Vendor profile created"),
        (status_code = 400, description = "Invalid request"),
        (status_code = 409, description = "Profile already exists"),
    ),
)]
#[tracing::instrument(
    name = "vendors.create_profile",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, vendor_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<VendorProfileRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VendorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let profile = VendorProfile::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));

    let vendor = state
        .app
        .vendors
        .create_profile(user, profile)
        .await
        .map_err(into_status_error)?;

    span.record("vendor_uuid", tracing::field::display(vendor.uuid));

    res.status_code(StatusCode::CREATED);

    Ok(Json(vendor.into()))
}
