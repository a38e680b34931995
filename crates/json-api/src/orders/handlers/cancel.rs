//! Cancel Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Cancel Order Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CancelOrderRequest {
    pub reason: Option<String>,
}

/// Cancel one of the caller's orders
///
/// Only pending or confirmed orders can be cancelled. Reserved stock is
/// returned to the vendor.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "orders.cancel",
    skip(order, json, depot),
    fields(user_uuid = tracing::field::Empty, order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<CancelOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let order = order.into_inner();
    let reason = json.into_inner().reason;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("order_uuid", tracing::field::display(order));

    let order = state
        .app
        .orders
        .cancel_order(user, order.into(), reason)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use expresskart_app::domain::{
        orders::{
            MockOrdersService, OrdersServiceError,
            records::{OrderStatus, OrderUuid},
        },
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
            Router::with_path("orders/{order}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_cancel_records_reason() -> TestResult {
        let uuid = OrderUuid::new();
        let mut orders = MockOrdersService::new();

        orders
            .expect_cancel_order()
            .once()
            .withf(move |user, o, reason| {
                *user == TEST_USER_UUID && *o == uuid && reason.as_deref() == Some("Ordered twice")
            })
            .return_once(move |user, _, reason| {
                let mut order = make_order(uuid, user, OrderStatus::Cancelled);

                order.cancellation_reason = reason;

                Ok(order)
            });

        let body: OrderResponse =
            TestClient::delete(format!("http://example.com/orders/{uuid}"))
                .json(&json!({ "reason": "Ordered twice" }))
                .send(&make_service(orders))
                .await
                .take_json()
                .await?;

        assert_eq!(body.status, "cancelled");
        assert_eq!(body.cancellation_reason.as_deref(), Some("Ordered twice"));

        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_shipped_order_returns_409() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_cancel_order().once().return_once(|_, _, _| {
            Err(OrdersServiceError::InvalidTransition {
                from: OrderStatus::OutForDelivery,
                to: OrderStatus::Cancelled,
            })
        });

        let res = TestClient::delete(format!("http://example.com/orders/{}", OrderUuid::new()))
            .json(&json!({}))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_someone_elses_order_returns_403() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_cancel_order()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::Forbidden));

        let res = TestClient::delete(format!("http://example.com/orders/{}", OrderUuid::new()))
            .json(&json!({}))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
