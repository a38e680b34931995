//! Delete Vendor Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, vendors::errors::into_status_error};

/// Delete Vendor Handler
#[endpoint(
    tags("admin"),
    summary = "Delete Vendor",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "vendors.delete",
    skip(vendor, depot),
    fields(vendor_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    vendor: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = vendor.into_inner();

    tracing::Span::current().record("vendor_uuid", tracing::field::display(vendor));

    state
        .app
        .vendors
        .delete_vendor(vendor.into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use expresskart_app::domain::{
        users::records::Role,
        vendors::{MockVendorsService, VendorsServiceError, records::VendorUuid},
    };

    use crate::test_helpers::{Mocks, service_as};

    use super::*;

    fn make_service(vendors: MockVendorsService) -> Service {
        service_as(
            Role::Admin,
            Mocks {
                vendors,
                ..Mocks::default()
            },
            Router::with_path("admin/vendors/{vendor}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_vendor() -> TestResult {
        let uuid = VendorUuid::new();
        let mut vendors = MockVendorsService::new();

        vendors
            .expect_delete_vendor()
            .once()
            .withf(move |v| *v == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/admin/vendors/{uuid}"))
            .send(&make_service(vendors))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_vendor_with_orders_returns_409() -> TestResult {
        let mut vendors = MockVendorsService::new();

        vendors
            .expect_delete_vendor()
            .once()
            .return_once(|_| Err(VendorsServiceError::InvalidReference));

        let res = TestClient::delete(format!(
            "http://example.com/admin/vendors/{}",
            VendorUuid::new()
        ))
        .send(&make_service(vendors))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
