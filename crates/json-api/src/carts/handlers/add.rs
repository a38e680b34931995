//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_uuid: Uuid,

    /// Defaults to 1.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Add units of a product. Adding a product already in the cart increases
/// its quantity.
#[endpoint(
    tags("cart"),
    summary = "Add Cart Item",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "cart.add_item",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let AddCartItemRequest {
        product_uuid,
        quantity,
    } = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(product_uuid));
    span.record("quantity", quantity);

    let summary = state
        .app
        .carts
        .add_item(user, product_uuid.into(), quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use expresskart_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::records::ProductUuid,
        users::records::Role,
    };

    use crate::{
        carts::models::tests::{make_line, make_summary},
        test_helpers::{Mocks, TEST_USER_UUID, service_as},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        service_as(
            Role::User,
            Mocks {
                carts,
                ..Mocks::default()
            },
            Router::with_path("cart/add").post(handler),
        )
    }

    #[tokio::test]
    async fn test_quantity_defaults_to_one() -> TestResult {
        let product = ProductUuid::new();
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |user, p, quantity| *user == TEST_USER_UUID && *p == product && *quantity == 1)
            .return_once(move |_, _, _| Ok(make_summary(vec![make_line(product, 2_500, 1)], None)));

        let body: CartResponse = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "product_uuid": product.into_uuid() }))
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert_eq!(body.item_count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_stock_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::InsufficientStock));

        let res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "product_uuid": ProductUuid::new().into_uuid(), "quantity": 999 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::ProductNotFound));

        let res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "product_uuid": ProductUuid::new().into_uuid() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
