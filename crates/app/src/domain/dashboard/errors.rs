//! Dashboard service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardServiceError {
    #[error("storage error")]
    Sql(#[from] Error),
}
