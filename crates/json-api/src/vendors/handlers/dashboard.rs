//! Vendor Dashboard Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    vendors::{errors::profile_status_error, models::VendorDashboardResponse},
};

/// Vendor Dashboard Handler
#[endpoint(
    tags("vendors"),
    summary = "Vendor Dashboard",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<VendorDashboardResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let dashboard = state
        .app
        .vendors
        .dashboard(user)
        .await
        .map_err(profile_status_error)?;

    Ok(Json(dashboard.into()))
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashMap;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use expresskart_app::domain::{
        orders::records::OrderStatus,
        users::records::Role,
        vendors::{MockVendorsService, records::VendorDashboard},
    };

    use crate::test_helpers::{Mocks, service_as};

    use super::*;

    #[tokio::test]
    async fn test_dashboard_totals_orders() -> TestResult {
        let mut vendors = MockVendorsService::new();

        vendors.expect_dashboard().once().return_once(|_| {
            let mut orders_by_status = FxHashMap::default();

            orders_by_status.insert(OrderStatus::Pending, 2);
            orders_by_status.insert(OrderStatus::Delivered, 3);

            Ok(VendorDashboard {
                total_products: 4,
                active_products: 3,
                orders_by_status,
                revenue: 150_000,
                ..VendorDashboard::default()
            })
        });

        let service = service_as(
            Role::Vendor,
            Mocks {
                vendors,
                ..Mocks::default()
            },
            Router::with_path("vendors/dashboard").get(handler),
        );

        let body: VendorDashboardResponse = TestClient::get("http://example.com/vendors/dashboard")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.total_orders, 5);
        assert_eq!(body.revenue, 150_000);
        assert_eq!(body.orders_by_status.len(), 2);

        Ok(())
    }
}
