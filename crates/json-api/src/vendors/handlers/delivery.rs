//! Delivery Settings Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    state::State,
    vendors::{
        errors::profile_status_error,
        models::{DeliverySettingsBody, VendorResponse},
    },
};

/// Replace the caller's delivery radius, minimum order, fee and ETA.
#[endpoint(
    tags("vendors"),
    summary = "Update Delivery Settings",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "vendors.update_delivery_settings",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<DeliverySettingsBody>,
    depot: &mut Depot,
) -> Result<Json<VendorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let vendor = state
        .app
        .vendors
        .update_delivery_settings(user, json.into_inner().into())
        .await
        .map_err(profile_status_error)?;

    Ok(Json(vendor.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use expresskart_app::domain::{
        users::records::Role,
        vendors::{MockVendorsService, records::VendorUuid},
    };

    use crate::{
        test_helpers::{Mocks, service_as},
        vendors::models::tests::make_vendor,
    };

    use super::*;

    #[tokio::test]
    async fn test_settings_are_applied() -> TestResult {
        let mut vendors = MockVendorsService::new();

        vendors
            .expect_update_delivery_settings()
            .once()
            .withf(|_, settings| settings.delivery_fee == 2_500 && settings.min_order_amount == 20_000)
            .return_once(|user, settings| {
                let mut vendor = make_vendor(VendorUuid::new(), user);

                vendor.delivery = settings;

                Ok(vendor)
            });

        let service = service_as(
            Role::Vendor,
            Mocks {
                vendors,
                ..Mocks::default()
            },
            Router::with_path("vendors/delivery-settings").put(handler),
        );

        let body: VendorResponse = TestClient::put("http://example.com/vendors/delivery-settings")
            .json(&json!({
                "delivery_radius_km": 8,
                "min_order_amount": 20_000,
                "delivery_fee": 2_500,
                "estimated_delivery_minutes": 45
            }))
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.delivery.delivery_fee, 2_500);
        assert_eq!(body.delivery.estimated_delivery_minutes, 45);

        Ok(())
    }
}
