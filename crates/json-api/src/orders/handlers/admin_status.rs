//! Admin Order Status Handler

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

/// Set any order's status. The usual transition rules still apply.
#[endpoint(
    tags("admin"),
    summary = "Set Order Status",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "orders.admin_update_status",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<OrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = order.into_inner();
    let status = parse_order_status(&json.into_inner().status)?;

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("status", status.as_str());

    let order = state
        .app
        .orders
        .admin_update_status(order.into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
