//! Delete Upload Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{extensions::*, state::State, uploads::errors::into_status_error};

/// Remove a stored image by id, with or without its extension.
#[endpoint(
    tags("uploads"),
    summary = "Delete Upload",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(name = "uploads.delete", skip(id, depot), fields(upload_id = tracing::field::Empty), err)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();

    tracing::Span::current().record("upload_id", id.as_str());

    state
        .app
        .uploads
        .delete(&id)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use expresskart_app::{
        domain::users::records::Role,
        uploads::{MockUploadsService, UploadsError},
    };

    use crate::test_helpers::{Mocks, service_as};

    use super::*;

    fn make_service(uploads: MockUploadsService) -> Service {
        service_as(
            Role::Vendor,
            Mocks {
                uploads,
                ..Mocks::default()
            },
            Router::with_path("upload/{id}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_upload() -> TestResult {
        let mut uploads = MockUploadsService::new();

        uploads
            .expect_delete()
            .once()
            .withf(|id| id.to_string() == "0192.png")
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/upload/0192.png")
            .send(&make_service(uploads))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_upload_returns_404() -> TestResult {
        let mut uploads = MockUploadsService::new();

        uploads
            .expect_delete()
            .once()
            .return_once(|_| Err(UploadsError::NotFound));

        let res = TestClient::delete("http://example.com/upload/missing")
            .send(&make_service(uploads))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
