//! Product Status Handler

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
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// Product Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductStatusRequest {
    pub is_active: bool,
}

/// Show or hide any product on the storefront.
#[endpoint(
    tags("admin"),
    summary = "Set Product Status",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "products.set_active",
    skip(product, json, depot),
    fields(product_uuid = tracing::field::Empty, is_active = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ProductStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();
    let is_active = json.into_inner().is_active;

    let span = tracing::Span::current();

    span.record("product_uuid", tracing::field::display(product));
    span.record("is_active", is_active);

    let product = state
        .app
        .products
        .set_active(product.into(), is_active)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use expresskart_app::domain::{
        products::{MockProductsService, records::ProductUuid},
        users::records::Role,
        vendors::records::VendorUuid,
    };

    use crate::{
        products::models::tests::make_product,
        test_helpers::{Mocks, service_as},
    };

    use super::*;

    #[tokio::test]
    async fn test_hide_product() -> TestResult {
        let uuid = ProductUuid::new();
        let mut products = MockProductsService::new();

        products
            .expect_set_active()
            .once()
            .withf(move |p, active| *p == uuid && !*active)
            .return_once(move |_, is_active| {
                let mut product = make_product(uuid, VendorUuid::new());

                product.is_active = is_active;

                Ok(product)
            });

        let service = service_as(
            Role::Admin,
            Mocks {
                products,
                ..Mocks::default()
            },
            Router::with_path("admin/products/{product}/status").patch(handler),
        );

        let body: ProductResponse =
            TestClient::patch(format!("http://example.com/admin/products/{uuid}/status"))
                .json(&json!({ "is_active": false }))
                .send(&service)
                .await
                .take_json()
                .await?;

        assert!(!body.is_active, "product should be hidden");

        Ok(())
    }
}
