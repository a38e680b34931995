//! Dashboard Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use expresskart_app::domain::dashboard::records::PlatformStats;

use crate::vendors::models::StatusCount;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RoleCount {
    pub role: String,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserStatsResponse {
    pub total: u64,
    pub by_role: Vec<RoleCount>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorStatsResponse {
    pub total: u64,
    pub verified: u64,
    pub pending: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductStatsResponse {
    pub total: u64,
    pub active: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatsResponse {
    pub total: u64,
    pub by_status: Vec<StatusCount>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewStatsResponse {
    pub total: u64,
    pub pending: u64,
}

/// Platform Stats Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlatformStatsResponse {
    pub users: UserStatsResponse,
    pub vendors: VendorStatsResponse,
    pub products: ProductStatsResponse,
    pub orders: OrderStatsResponse,

    /// Delivered order totals, paise
    pub revenue: u64,

    pub reviews: ReviewStatsResponse,
    pub new_enquiries: u64,
}

impl From<PlatformStats> for PlatformStatsResponse {
    fn from(stats: PlatformStats) -> Self {
        let mut by_role: Vec<RoleCount> = stats
            .users
            .by_role
            .into_iter()
            .map(|(role, count)| RoleCount {
                role: role.to_string(),
                count,
            })
            .collect();

        by_role.sort_by(|a, b| a.role.cmp(&b.role));

        let mut by_status: Vec<StatusCount> = stats
            .orders
            .by_status
            .into_iter()
            .map(|(status, count)| StatusCount {
                status: status.to_string(),
                count,
            })
            .collect();

        by_status.sort_by(|a, b| a.status.cmp(&b.status));

        Self {
            users: UserStatsResponse {
                total: stats.users.total,
                by_role,
            },
            vendors: VendorStatsResponse {
                total: stats.vendors.total,
                verified: stats.vendors.verified,
                pending: stats.vendors.pending,
            },
            products: ProductStatsResponse {
                total: stats.products.total,
                active: stats.products.active,
            },
            orders: OrderStatsResponse {
                total: stats.orders.total,
                by_status,
            },
            revenue: stats.revenue,
            reviews: ReviewStatsResponse {
                total: stats.reviews.total,
                pending: stats.reviews.pending,
            },
            new_enquiries: stats.new_enquiries,
        }
    }
}
