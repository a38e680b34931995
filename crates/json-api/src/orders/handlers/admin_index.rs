//! Admin Order List Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use expresskart_app::domain::orders::records::OrderStatus;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrdersResponse},
    state::State,
};

/// Admin Order List Handler
#[endpoint(
    tags("admin"),
    summary = "List All Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status = status.parse_or_400::<OrderStatus>("status")?;

    let orders = state
        .app
        .orders
        .list_orders(status)
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
        users::records::{Role, UserUuid},
    };

    use crate::{
        orders::models::tests::make_order,
        test_helpers::{Mocks, service_as},
    };

    use super::*;

    #[tokio::test]
    async fn test_admin_lists_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|status| *status == Some(OrderStatus::OutForDelivery))
            .return_once(|_| {
                Ok(vec![make_order(
                    OrderUuid::new(),
                    UserUuid::new(),
                    OrderStatus::OutForDelivery,
                )])
            });

        let service = service_as(
            Role::Admin,
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("admin/orders").get(handler),
        );

        let body: OrdersResponse =
            TestClient::get("http://example.com/admin/orders?status=out_for_delivery")
                .send(&service)
                .await
                .take_json()
                .await?;

        assert_eq!(body.count, 1);
        assert_eq!(
            body.orders.first().map(|o| o.status.as_str()),
            Some("out_for_delivery")
        );

        Ok(())
    }
}
