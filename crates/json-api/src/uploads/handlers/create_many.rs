//! Upload Multiple Images Handler

use std::sync::Arc;

use salvo::prelude::*;

use expresskart_app::uploads::MAX_FILES_PER_REQUEST;

use crate::{
    extensions::*,
    state::State,
    uploads::models::{UploadsResponse, check_part, discard, store_part},
};

/// Store every multipart `files` field.
///
/// Every part is checked before any is written. Files already stored are
/// removed again if a later one fails.
#[endpoint(
    tags("uploads"),
    summary = "Upload Multiple Images",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Images stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "No files, too many files or a rejected file"),
    ),
)]
#[tracing::instrument(
    name = "uploads.create_many",
    skip(req, depot, res),
    fields(count = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UploadsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let parts = match req.files("files").await {
        Some(parts) if !parts.is_empty() => parts,
        _ => return Err(StatusError::bad_request().brief("No files uploaded")),
    };

    if parts.len() > MAX_FILES_PER_REQUEST {
        return Err(StatusError::bad_request()
            .brief(format!("At most {MAX_FILES_PER_REQUEST} files per request")));
    }

    tracing::Span::current().record("count", parts.len());

    let uploads = state.app.uploads.as_ref();

    for part in parts {
        check_part(uploads, part)?;
    }

    let mut stored = Vec::with_capacity(parts.len());

    for part in parts {
        match store_part(uploads, part).await {
            Ok(upload) => stored.push(upload),
            Err(error) => {
                discard(uploads, &stored).await;

                return Err(error);
            }
        }
    }

    res.status_code(StatusCode::CREATED);

    Ok(Json(UploadsResponse {
        count: stored.len(),
        files: stored.into_iter().map(Into::into).collect(),
    }))
}
