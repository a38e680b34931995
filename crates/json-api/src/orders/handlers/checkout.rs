//! Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use expresskart_app::domain::orders::data::Checkout;

use crate::{
    extensions::*,
    observability::record_orders_placed,
    orders::{
        errors::into_status_error,
        models::{OrdersResponse, ShippingAddressBody, parse_payment_method},
    },
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    pub shipping_address: ShippingAddressBody,

    /// `cod` (default) or `online`.
    #[serde(default = "default_payment_method")]
    pub payment_method: String,

    pub discount_code: Option<String>,
    pub notes: Option<String>,
}

fn default_payment_method() -> String {
    "cod".to_string()
}

impl TryFrom<CheckoutRequest> for Checkout {
    type Error = StatusError;

    fn try_from(request: CheckoutRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            payment_method: parse_payment_method(&request.payment_method)?,
            shipping_address: request.shipping_address.into(),
            discount_code: request.discount_code,
            notes: request.notes,
        })
    }
}

/// Place orders for everything in the cart
///
/// Creates one order per vendor, reserves stock and empties the cart. Nothing
/// is written if any vendor's lines cannot be fulfilled.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Orders placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart, short stock, minimum not met or bad code"),
    ),
)]
#[tracing::instrument(
    name = "orders.checkout",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, orders = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let checkout = Checkout::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));

    let orders = state
        .app
        .orders
        .checkout(user, checkout)
        .await
        .map_err(into_status_error)?;

    span.record("orders", orders.len());
    record_orders_placed(orders.len());

    res.status_code(StatusCode::CREATED);

    Ok(Json(orders.into()))
}
