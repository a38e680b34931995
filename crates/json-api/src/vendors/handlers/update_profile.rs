//! Update Vendor Profile Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use expresskart_app::domain::vendors::data::VendorProfile;

use crate::{
    extensions::*,
    state::State,
    vendors::{
        errors::profile_status_error,
        models::{VendorProfileRequest, VendorResponse},
    },
};

/// Update Vendor Profile Handler
#[endpoint(
    tags("vendors"),
    summary = "Update Own Vendor Profile",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "vendors.update_profile",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<VendorProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<VendorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let profile = VendorProfile::try_from(json.into_inner())?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let vendor = state
        .app
        .vendors
        .update_profile(user, profile)
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
        test_helpers::{Mocks, TEST_VENDOR_OWNER_UUID, service_as},
        vendors::models::tests::make_vendor,
    };

    use super::*;

    #[tokio::test]
    async fn test_update_profile_passes_fields() -> TestResult {
        let mut vendors = MockVendorsService::new();

        vendors
            .expect_update_profile()
            .once()
            .withf(|user, profile| {
                *user == TEST_VENDOR_OWNER_UUID
                    && profile.business_name == "Sharma Fresh"
                    && profile.description == "Fruit and vegetables"
            })
            .return_once(|user, profile| {
                let mut vendor = make_vendor(VendorUuid::new(), user);

                vendor.business_name = profile.business_name;
                vendor.description = profile.description;

                Ok(vendor)
            });

        let service = service_as(
            Role::Vendor,
            Mocks {
                vendors,
                ..Mocks::default()
            },
            Router::with_path("vendors/profile").put(handler),
        );

        let body: VendorResponse = TestClient::put("http://example.com/vendors/profile")
            .json(&json!({
                "business_name": "Sharma Fresh",
                "description": "Fruit and vegetables",
                "business_type": "grocery",
                "address": {
                    "street": "12 MG Road",
                    "city": "Pune",
                    "state": "Maharashtra",
                    "pincode": "411001"
                },
                "contact_phone": "9800000000",
                "contact_email": "kirana@example.com"
            }))
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.business_name, "Sharma Fresh");

        Ok(())
    }
}
