//! Platform Stats Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    dashboard::{errors::into_status_error, models::PlatformStatsResponse},
    extensions::*,
    state::State,
};

/// Counts across users, vendors, products, orders and reviews.
#[endpoint(
    tags("admin"),
    summary = "Dashboard Stats",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PlatformStatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .app
        .dashboard
        .platform_stats()
        .await
        .map_err(into_status_error)?;

    Ok(Json(stats.into()))
}
