//! Upload Image Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    uploads::models::{UploadResponse, store_part},
};

/// Store the multipart `file` field as an image.
#[endpoint(
    tags("uploads"),
    summary = "Upload Image",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Image stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing, empty, oversized or unsupported file"),
    ),
)]
#[tracing::instrument(
    name = "uploads.create",
    skip(req, depot, res),
    fields(upload_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UploadResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(part) = req.file("file").await else {
        return Err(StatusError::bad_request().brief("No file uploaded"));
    };

    let upload = store_part(state.app.uploads.as_ref(), part).await?;

    tracing::Span::current().record("upload_id", upload.id.as_str());

    res.status_code(StatusCode::CREATED);

    Ok(Json(upload.into()))
}
