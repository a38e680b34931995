//! Product Categories Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use expresskart_app::domain::products::records::Category;

/// Categories Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// Every category a product can be listed under.
#[endpoint(tags("products"), summary = "List Categories")]
pub(crate) async fn handler() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: Category::ALL
            .into_iter()
            .map(|category| category.as_str().to_string())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, public_service};

    use super::*;

    #[tokio::test]
    async fn test_lists_all_categories() -> TestResult {
        let service = public_service(
            Mocks::default(),
            Router::with_path("products/categories").get(handler),
        );

        let body: CategoriesResponse = TestClient::get("http://example.com/products/categories")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.categories.len(), 10);
        assert!(body.categories.iter().any(|c| c == "personal-care"));

        Ok(())
    }
}
