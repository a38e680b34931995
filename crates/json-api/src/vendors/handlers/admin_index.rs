//! Admin Vendor List Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    state::State,
    vendors::{
        errors::into_status_error,
        models::{VendorsResponse, parse_vendor_status},
    },
};

/// Every vendor regardless of status, optionally filtered by one.
#[endpoint(
    tags("admin"),
    summary = "List All Vendors",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<VendorsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = status
        .into_inner()
        .as_deref()
        .map(parse_vendor_status)
        .transpose()?;

    let vendors = state
        .app
        .vendors
        .list_vendors(status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(vendors.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use expresskart_app::domain::{
        users::records::{Role, UserUuid},
        vendors::{
            MockVendorsService,
            records::{VendorStatus, VendorUuid},
        },
    };

    use crate::{
        test_helpers::{Mocks, service_as},
        vendors::models::tests::make_vendor,
    };

    use super::*;

    #[tokio::test]
    async fn test_status_filter() -> TestResult {
        let mut vendors = MockVendorsService::new();

        vendors
            .expect_list_vendors()
            .once()
            .withf(|status| *status == Some(VendorStatus::Pending))
            .return_once(|_| {
                let mut vendor = make_vendor(VendorUuid::new(), UserUuid::new());

                vendor.status = VendorStatus::Pending;

                Ok(vec![vendor])
            });

        let service = service_as(
            Role::Admin,
            Mocks {
                vendors,
                ..Mocks::default()
            },
            Router::with_path("admin/vendors").get(handler),
        );

        let body: VendorsResponse = TestClient::get("http://example.com/admin/vendors?status=pending")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.count, 1);
        assert!(body.vendors.iter().all(|v| v.status == "pending"));

        Ok(())
    }
}
