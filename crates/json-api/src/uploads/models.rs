//! Upload Models

use salvo::{http::form::FilePart, oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use tracing::warn;

use expresskart_app::uploads::{StoredUpload, UploadsService, check_upload};

use crate::{extensions::*, uploads::errors::into_status_error};

/// Upload Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UploadResponse {
    pub id: String,
    pub url: String,
    pub content_type: String,
    pub size: u64,
}

impl From<StoredUpload> for UploadResponse {
    fn from(upload: StoredUpload) -> Self {
        Self {
            id: upload.id,
            url: upload.url,
            content_type: upload.content_type.content_type().to_string(),
            size: upload.size,
        }
    }
}

/// Uploads Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UploadsResponse {
    pub count: usize,
    pub files: Vec<UploadResponse>,
}

/// Declared type of a multipart file. Parts without one are passed on as
/// `application/octet-stream` and rejected.
fn part_content_type(part: &FilePart) -> String {
    part.content_type().map_or_else(
        || "application/octet-stream".to_string(),
        |mime| mime.essence_str().to_string(),
    )
}

/// Reject a multipart file on its declared type and size, before any of it
/// is read into memory.
pub(crate) fn check_part(uploads: &dyn UploadsService, part: &FilePart) -> Result<(), StatusError> {
    check_upload(uploads.settings(), &part_content_type(part), part.size())
        .map(|_| ())
        .map_err(into_status_error)
}

/// Hand a multipart file to the upload service.
pub(crate) async fn store_part(
    uploads: &dyn UploadsService,
    part: &FilePart,
) -> Result<StoredUpload, StatusError> {
    check_part(uploads, part)?;

    let bytes = tokio::fs::read(part.path())
        .await
        .or_500("failed to read multipart upload")?;

    uploads
        .store(&part_content_type(part), bytes)
        .await
        .map_err(into_status_error)
}

/// Remove files already stored by a request that is failing.
pub(crate) async fn discard(uploads: &dyn UploadsService, stored: &[StoredUpload]) {
    for upload in stored {
        if let Err(error) = uploads.delete(&upload.id).await {
            warn!(upload_id = %upload.id, "failed to remove partial upload: {error}");
        }
    }
}
