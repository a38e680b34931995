//! List Enquiries Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use expresskart_app::domain::enquiries::records::EnquiryStatus;

use crate::{
    enquiries::{errors::into_status_error, models::EnquiriesEnvelope},
    extensions::*,
    state::State,
};

/// Enquiries, newest first.
#[endpoint(
    tags("enquiries"),
    summary = "List Enquiries",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<EnquiriesEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status = status.parse_or_400::<EnquiryStatus>("status")?;

    let enquiries = state
        .app
        .enquiries
        .list_enquiries(status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(enquiries.into()))
}
