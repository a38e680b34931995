//! Vendor Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use expresskart_app::domain::products::data::ProductQuery;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductPageResponse},
    state::State,
};

/// A vendor's active products
#[endpoint(tags("vendors"), summary = "List Vendor Products")]
pub(crate) async fn handler(
    vendor: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = state
        .app
        .products
        .list_products(ProductQuery {
            vendor: Some(vendor.into_inner().into()),
            ..ProductQuery::default()
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use expresskart_app::domain::{
        products::{MockProductsService, records::ProductPage},
        vendors::records::VendorUuid,
    };

    use crate::test_helpers::{Mocks, public_service};

    use super::*;

    #[tokio::test]
    async fn test_lists_products_of_vendor() -> TestResult {
        let vendor = VendorUuid::new();
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(move |query| query.vendor == Some(vendor))
            .return_once(|query| {
                Ok(ProductPage {
                    products: Vec::new(),
                    page: query.page(),
                    limit: query.limit(),
                    total: 0,
                })
            });

        let service = public_service(
            Mocks {
                products,
                ..Mocks::default()
            },
            Router::with_path("vendors/{vendor}/products").get(handler),
        );

        let body: ProductPageResponse =
            TestClient::get(format!("http://example.com/vendors/{vendor}/products"))
                .send(&service)
                .await
                .take_json()
                .await?;

        assert_eq!(body.page, 1);
        assert_eq!(body.limit, 20);

        Ok(())
    }
}
