//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// The caller's cart grouped by vendor
///
/// Pass `discount_code` to preview a code's effect on the totals.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    discount_code: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let summary = state
        .app
        .carts
        .get_cart(user, discount_code.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use expresskart_app::domain::{
        carts::{
            CartsServiceError, MockCartsService,
            pricing::{DiscountCode, InvalidDiscountCode},
        },
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
            Router::with_path("cart").get(handler),
        )
    }

    #[tokio::test]
    async fn test_cart_with_discount_preview() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|user, code| *user == TEST_USER_UUID && code.as_deref() == Some("welcome10"))
            .return_once(|_, _| {
                Ok(make_summary(
                    vec![make_line(ProductUuid::new(), 10_000, 3)],
                    Some(DiscountCode::Welcome10),
                ))
            });

        let body: CartResponse = TestClient::get("http://example.com/cart?discount_code=welcome10")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert_eq!(body.vendors.len(), 1);
        assert_eq!(body.item_count, 3);
        assert_eq!(body.subtotal, 30_000);
        assert_eq!(body.discount, 3_000);
        assert_eq!(body.delivery_total, 5_000);
        assert_eq!(body.total, 32_000);
        assert_eq!(body.discount_code.as_deref(), Some("WELCOME10"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_discount_code_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_get_cart().once().return_once(|_, _| {
            Err(CartsServiceError::InvalidDiscountCode(InvalidDiscountCode(
                "BOGUS".to_string(),
            )))
        });

        let res = TestClient::get("http://example.com/cart?discount_code=BOGUS")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
