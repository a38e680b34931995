//! Vendor Directory Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use expresskart_app::domain::vendors::data::VendorFilter;

use crate::{
    extensions::*,
    state::State,
    vendors::{
        errors::into_status_error,
        models::{VendorsResponse, parse_business_type},
    },
};

/// Vendor Directory Handler
///
/// Active, verified vendors only.
#[endpoint(tags("vendors"), summary = "List Vendors")]
pub(crate) async fn handler(
    city: QueryParam<String, false>,
    business_type: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<VendorsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = VendorFilter {
        city: city.into_inner(),
        business_type: business_type
            .into_inner()
            .as_deref()
            .map(parse_business_type)
            .transpose()?,
    };

    let vendors = state
        .app
        .vendors
        .list_public_vendors(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(vendors.into()))
}
