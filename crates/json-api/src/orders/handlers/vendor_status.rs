//! Vendor Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{OrderResponse, OrderStatusRequest, parse_order_status},
    },
    state::State,
};

/// Move an order placed with the caller's store along the fulfilment flow.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another vendor"),
        (status_code = StatusCode::CONFLICT, description = "Invalid order status transition"),
    ),
)]
#[tracing::instrument(
    name = "orders.vendor_update_status",
    skip(order, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        status = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<OrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let order = order.into_inner();
    let status = parse_order_status(&json.into_inner().status)?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("order_uuid", tracing::field::display(order));
    span.record("status", status.as_str());

    let order = state
        .app
        .orders
        .vendor_update_status(user, order.into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
