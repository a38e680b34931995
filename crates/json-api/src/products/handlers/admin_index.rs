//! Admin Product List Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use uuid::Uuid;

use expresskart_app::domain::products::{data::ProductQuery, records::Category};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductPageResponse},
    state::State,
};

/// Every product, inactive ones included.
#[endpoint(
    tags("admin"),
    summary = "List All Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    category: QueryParam<String, false>,
    vendor: QueryParam<String, false>,
    page: QueryParam<String, false>,
    limit: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = ProductQuery {
        q: q.into_inner(),
        category: category.parse_or_400::<Category>("category")?,
        vendor: vendor.parse_or_400::<Uuid>("vendor")?.map(Into::into),
        page: page.parse_or_400::<u32>("page")?,
        limit: limit.parse_or_400::<u32>("limit")?,
        ..ProductQuery::default()
    };

    let page = state
        .app
        .products
        .list_all_products(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
