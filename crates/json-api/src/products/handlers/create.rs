//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use expresskart_app::domain::products::data::ProductDetails;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{ProductRequest, ProductResponse},
    },
    state::State,
};

/// List a product under the caller's vendor profile.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "No vendor profile"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let details = ProductDetails::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));

    let product = state
        .app
        .products
        .create_product(user, details)
        .await
        .map_err(into_status_error)?;

    span.record("product_uuid", tracing::field::display(product.uuid));

    res.add_header(LOCATION, format!("/api/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use expresskart_app::domain::{
        products::{
            MockProductsService, ProductsServiceError,
            records::{Category, ProductUuid},
        },
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
            Router::with_path("products").post(handler),
        )
    }

    fn payload() -> Value {
        json!({
            "title": "Basmati Rice 5kg",
            "category": "grocery",
            "mrp": 60_000,
            "selling_price": 54_000,
            "stock": 25
        })
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let uuid = ProductUuid::new();
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|owner, details| {
                *owner == TEST_VENDOR_OWNER_UUID
                    && details.category == Category::Grocery
                    && details.stock == 25
                    && details.is_active
            })
            .return_once(move |_, _| Ok(make_product(uuid, VendorUuid::new())));

        let mut res = TestClient::post("http://example.com/products")
            .json(&payload())
            .send(&make_service(products))
            .await;

        let body: ProductResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/api/products/{uuid}").as_str()));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_price_above_mrp_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::PriceAboveMrp));

        let res = TestClient::post("http://example.com/products")
            .json(&payload())
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_without_vendor_profile_returns_403() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NoVendorProfile));

        let res = TestClient::post("http://example.com/products")
            .json(&payload())
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_category_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/products")
            .json(&json!({
                "title": "Mystery Box",
                "category": "curios",
                "mrp": 100,
                "selling_price": 100
            }))
            .send(&make_service(MockProductsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
