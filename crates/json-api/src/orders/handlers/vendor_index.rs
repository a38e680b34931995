//! Vendor Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use expresskart_app::domain::orders::records::OrderStatus;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrdersResponse},
    state::State,
};

/// Orders placed with the caller's store.
#[endpoint(
    tags("orders"),
    summary = "List Vendor Orders",
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
        .vendor_orders(user, status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}
