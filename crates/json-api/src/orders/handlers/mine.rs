//! My Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use expresskart_app::domain::orders::records::OrderStatus;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrdersResponse},
    state::State,
};

/// The caller's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let status = status.parse_or_400::<OrderStatus>("status")?;

    let orders = state
        .app
        .orders
        .my_orders(user, status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use expresskart_app::domain::{
        orders::{MockOrdersService, records::OrderUuid},
        users::records::Role,
    };

    use crate::{
        orders::models::tests::make_order,
        test_helpers::{Mocks, TEST_USER_UUID, service_as},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        service_as(
            Role::User,
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("orders/my").get(handler),
        )
    }

    #[tokio::test]
    async fn test_lists_own_orders_by_status() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_my_orders()
            .once()
            .withf(|user, status| *user == TEST_USER_UUID && *status == Some(OrderStatus::Delivered))
            .return_once(|user, _| {
                Ok(vec![make_order(OrderUuid::new(), user, OrderStatus::Delivered)])
            });

        let body: OrdersResponse = TestClient::get("http://example.com/orders/my?status=delivered")
            .send(&make_service(orders))
            .await
            .take_json()
            .await?;

        assert_eq!(body.count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_bad_status_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/orders/my?status=lost")
            .send(&make_service(MockOrdersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
