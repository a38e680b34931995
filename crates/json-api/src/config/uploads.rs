//! Upload Config

use std::path::PathBuf;

use clap::Args;

use expresskart_app::uploads::DEFAULT_MAX_UPLOAD_BYTES;

/// Where uploaded images live and how they are addressed.
#[derive(Debug, Args)]
pub struct UploadConfig {
    /// Directory uploaded files are written to
    #[arg(long, env = "UPLOAD_DIR", default_value = "./uploads")]
    pub upload_dir: PathBuf,

    /// URL prefix returned for stored files
    #[arg(long, env = "UPLOAD_PUBLIC_BASE", default_value = "/uploads")]
    pub upload_public_base: String,

    /// Largest accepted file in bytes
    #[arg(long, env = "UPLOAD_MAX_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub upload_max_bytes: u64,
}
