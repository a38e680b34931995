//! Admin dashboard service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::dashboard::{
        errors::DashboardServiceError, records::PlatformStats, repository::PgDashboardRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgDashboardService {
    db: Db,
    repository: PgDashboardRepository,
}

impl PgDashboardService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgDashboardRepository::new(),
        }
    }
}

#[async_trait]
impl DashboardService for PgDashboardService {
    async fn platform_stats(&self) -> Result<PlatformStats, DashboardServiceError> {
        let mut tx = self.db.begin().await?;

        let stats = self.repository.platform_stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Counts of users, vendors, products, orders, reviews and new enquiries.
    async fn platform_stats(&self) -> Result<PlatformStats, DashboardServiceError>;
}
