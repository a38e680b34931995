//! Delete Enquiry Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    enquiries::{
        errors::for_enquiry,
        models::{DeletedEnvelope, Empty},
    },
    extensions::*,
    state::State,
};

/// Delete Enquiry Handler
#[endpoint(
    tags("enquiries"),
    summary = "Delete Enquiry",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "enquiries.delete",
    skip(enquiry, depot),
    fields(enquiry_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    enquiry: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<DeletedEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let enquiry = enquiry.into_inner();

    tracing::Span::current().record("enquiry_uuid", tracing::field::display(enquiry));

    state
        .app
        .enquiries
        .delete_enquiry(enquiry.into())
        .await
        .map_err(for_enquiry(enquiry))?;

    Ok(Json(DeletedEnvelope {
        success: true,
        data: Empty::default(),
    }))
}
