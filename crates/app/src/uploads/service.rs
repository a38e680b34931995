//! Uploads service.

use std::{fmt, io::ErrorKind, path::PathBuf, str::FromStr};

use async_trait::async_trait;
use mockall::automock;
use tokio::fs;
use uuid::Uuid;

use crate::uploads::errors::UploadsError;

/// Default upper bound for a single file, 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Maximum number of files accepted by a multi-file upload.
pub const MAX_FILES_PER_REQUEST: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    /// Directory files are written to.
    pub dir: PathBuf,

    /// URL prefix stored files are served under.
    pub public_base: String,

    pub max_bytes: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./uploads"),
            public_base: "/uploads".to_string(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Accepted image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl ImageType {
    pub const ALL: [Self; 4] = [Self::Jpeg, Self::Png, Self::Webp, Self::Gif];

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Gif => "gif",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content_type())
    }
}

impl FromStr for ImageType {
    type Err = UploadsError;

    /// Parse a MIME type, ignoring parameters and case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let essence = value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            "image/png" => Ok(Self::Png),
            "image/webp" => Ok(Self::Webp),
            "image/gif" => Ok(Self::Gif),
            _ => Err(UploadsError::UnsupportedType(value.to_string())),
        }
    }
}

/// A file that has been written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub id: String,
    pub url: String,
    pub content_type: ImageType,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct FsUploadsService {
    settings: UploadSettings,
}

impl FsUploadsService {
    #[must_use]
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    fn url_for(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.settings.public_base.trim_end_matches('/'))
    }
}

/// Check a file's declared type and size against `settings` without
/// touching its contents.
///
/// # Errors
///
/// Returns [`UploadsError::UnsupportedType`] for anything other than an
/// accepted image, and [`UploadsError::Empty`] or [`UploadsError::TooLarge`]
/// when the size is out of bounds.
pub fn check_upload(
    settings: &UploadSettings,
    content_type: &str,
    size: u64,
) -> Result<ImageType, UploadsError> {
    let kind: ImageType = content_type.parse()?;

    if size == 0 {
        return Err(UploadsError::Empty);
    }

    if size > settings.max_bytes {
        return Err(UploadsError::TooLarge {
            size,
            max: settings.max_bytes,
        });
    }

    Ok(kind)
}

/// Upload ids are bare file stems. Anything that could leave the upload
/// directory is rejected.
fn check_id(id: &str) -> Result<&str, UploadsError> {
    let id = id.trim();

    if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
        return Err(UploadsError::InvalidId);
    }

    Ok(id)
}

#[async_trait]
impl UploadsService for FsUploadsService {
    fn settings(&self) -> &UploadSettings {
        &self.settings
    }

    #[tracing::instrument(name = "uploads.store", skip(self, bytes), fields(size = bytes.len()), err)]
    async fn store(&self, content_type: &str, bytes: Vec<u8>) -> Result<StoredUpload, UploadsError> {
        let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        let kind = check_upload(&self.settings, content_type, size)?;

        let id = Uuid::now_v7().to_string();
        let file_name = format!("{id}.{}", kind.extension());

        fs::create_dir_all(&self.settings.dir).await?;
        fs::write(self.settings.dir.join(&file_name), &bytes).await?;

        Ok(StoredUpload {
            url: self.url_for(&file_name),
            id,
            content_type: kind,
            size,
        })
    }

    #[tracing::instrument(name = "uploads.delete", skip(self), err)]
    async fn delete(&self, id: &str) -> Result<(), UploadsError> {
        let id = check_id(id)?;

        let candidates = std::iter::once(id.to_string()).chain(
            ImageType::ALL
                .into_iter()
                .map(|kind| format!("{id}.{}", kind.extension())),
        );

        for file_name in candidates {
            match fs::remove_file(self.settings.dir.join(&file_name)).await {
                Ok(()) => return Ok(()),
                Err(error) if error.kind() == ErrorKind::NotFound => {}
                Err(error) => return Err(error.into()),
            }
        }

        Err(UploadsError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait UploadsService: Send + Sync {
    fn settings(&self) -> &UploadSettings;

    /// Validate and persist an image, returning where it can be fetched.
    async fn store(&self, content_type: &str, bytes: Vec<u8>) -> Result<StoredUpload, UploadsError>;

    /// Remove a stored image by id, with or without its extension.
    async fn delete(&self, id: &str) -> Result<(), UploadsError>;
}
