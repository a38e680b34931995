//! Update Cart Item Handler

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
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// Zero removes the line.
    pub quantity: u32,
}

/// Set the quantity of a product already in the cart.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "cart.update_item",
    skip(product, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let product = product.into_inner();
    let quantity = json.into_inner().quantity;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(product));
    span.record("quantity", quantity);

    let summary = state
        .app
        .carts
        .update_item(user, product.into(), quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}
