//! Product Search Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use uuid::Uuid;

use expresskart_app::domain::products::{
    data::ProductQuery,
    records::{Category, ProductSort},
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductPageResponse},
    state::State,
};

/// Search active products
///
/// `q` matches title, description and tags. Prices are in paise. `sort` is
/// one of `newest` (default), `price_asc`, `price_desc` or `rating`.
#[endpoint(tags("products"), summary = "Search Products")]
#[expect(
    clippy::too_many_arguments,
    reason = "one extractor per documented query parameter"
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    category: QueryParam<String, false>,
    vendor: QueryParam<String, false>,
    featured: QueryParam<String, false>,
    min_price: QueryParam<String, false>,
    max_price: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    page: QueryParam<String, false>,
    limit: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = ProductQuery {
        q: q.into_inner(),
        category: category.parse_or_400::<Category>("category")?,
        vendor: vendor.parse_or_400::<Uuid>("vendor")?.map(Into::into),
        featured: featured.parse_or_400::<bool>("featured")?,
        min_price: min_price.parse_or_400::<u64>("min_price")?,
        max_price: max_price.parse_or_400::<u64>("max_price")?,
        sort: sort.parse_or_400::<ProductSort>("sort")?.unwrap_or_default(),
        page: page.parse_or_400::<u32>("page")?,
        limit: limit.parse_or_400::<u32>("limit")?,
    };

    let page = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
