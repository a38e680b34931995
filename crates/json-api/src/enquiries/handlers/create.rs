//! Create Enquiry Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    enquiries::{
        errors::into_status_error,
        models::{EnquiryEnvelope, EnquiryRequest},
    },
    extensions::*,
    state::State,
};

/// Submit the contact form. No account needed.
#[endpoint(
    tags("enquiries"),
    summary = "Create Enquiry",
    responses(
        (status_code = StatusCode::CREATED, description = "Enquiry recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing fields"),
    ),
)]
#[tracing::instrument(
    name = "enquiries.create",
    skip(json, depot, res),
    fields(enquiry_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<EnquiryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<EnquiryEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let enquiry = state
        .app
        .enquiries
        .create_enquiry(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("enquiry_uuid", tracing::field::display(enquiry.uuid));

    res.status_code(StatusCode::CREATED);

    Ok(Json(enquiry.into()))
}
