//! Own Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductsResponse},
    state::State,
};

/// The caller's catalogue, inactive products included.
#[endpoint(
    tags("products"),
    summary = "List Own Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let products = state
        .app
        .products
        .owned_products(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use expresskart_app::domain::{
        products::{MockProductsService, ProductsServiceError, records::ProductUuid},
        users::records::Role,
        vendors::records::VendorUuid,
    };

    use crate::{
        products::models::tests::make_product,
        test_helpers::{Mocks, TEST_VENDOR_OWNER_UUID, service_as},
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        service_as(
            Role::Vendor,
            Mocks {
                products,
                ..Mocks::default()
            },
            Router::with_path("products/vendor/me").get(handler),
        )
    }

    #[tokio::test]
    async fn test_includes_inactive_products() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_owned_products()
            .once()
            .withf(|owner| *owner == TEST_VENDOR_OWNER_UUID)
            .return_once(|_| {
                let vendor = VendorUuid::new();
                let mut hidden = make_product(ProductUuid::new(), vendor);

                hidden.is_active = false;

                Ok(vec![make_product(ProductUuid::new(), vendor), hidden])
            });

        let body: ProductsResponse = TestClient::get("http://example.com/products/vendor/me")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(body.count, 2);
        assert!(body.products.iter().any(|p| !p.is_active));

        Ok(())
    }

    #[tokio::test]
    async fn test_without_vendor_profile_returns_403() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_owned_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::NoVendorProfile));

        let res = TestClient::get("http://example.com/products/vendor/me")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
