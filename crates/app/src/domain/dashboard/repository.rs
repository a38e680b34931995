//! Dashboard Repository

use std::{error::Error as StdError, hash::Hash, str::FromStr};

use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction, query};

use crate::{
    database::{try_get_enum, try_get_tally},
    domain::dashboard::records::{
        OrderStats, PlatformStats, ProductStats, ReviewStats, UserStats, VendorStats,
    },
};

const PLATFORM_TOTALS_SQL: &str = include_str!("sql/platform_totals.sql");
const USERS_BY_ROLE_SQL: &str = include_str!("sql/users_by_role.sql");
const ORDERS_BY_STATUS_SQL: &str = include_str!("sql/orders_by_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgDashboardRepository;

impl PgDashboardRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn platform_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<PlatformStats, sqlx::Error> {
        let row = query(PLATFORM_TOTALS_SQL).fetch_one(&mut **tx).await?;

        Ok(PlatformStats {
            users: UserStats {
                total: try_get_tally(&row, "total_users")?,
                by_role: self.breakdown(tx, USERS_BY_ROLE_SQL).await?,
            },
            vendors: VendorStats {
                total: try_get_tally(&row, "total_vendors")?,
                verified: try_get_tally(&row, "verified_vendors")?,
                pending: try_get_tally(&row, "pending_vendors")?,
            },
            products: ProductStats {
                total: try_get_tally(&row, "total_products")?,
                active: try_get_tally(&row, "active_products")?,
            },
            orders: OrderStats {
                total: try_get_tally(&row, "total_orders")?,
                by_status: self.breakdown(tx, ORDERS_BY_STATUS_SQL).await?,
            },
            revenue: try_get_tally(&row, "revenue")?,
            reviews: ReviewStats {
                total: try_get_tally(&row, "total_reviews")?,
                pending: try_get_tally(&row, "pending_reviews")?,
            },
            new_enquiries: try_get_tally(&row, "new_enquiries")?,
        })
    }

    /// Run a `label, tally` grouping query into a map.
    async fn breakdown<K>(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sql: &'static str,
    ) -> Result<FxHashMap<K, u64>, sqlx::Error>
    where
        K: FromStr + Eq + Hash,
        K::Err: StdError + Send + Sync + 'static,
    {
        let rows = query(sql).fetch_all(&mut **tx).await?;

        rows.iter()
            .map(|row| {
                Ok::<_, sqlx::Error>((
                    try_get_enum::<K>(row, "label")?,
                    try_get_tally(row, "tally")?,
                ))
            })
            .collect()
    }
}
