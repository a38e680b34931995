//! Update Enquiry Status Handler

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
    enquiries::{
        errors::for_enquiry,
        models::{EnquiryEnvelope, parse_enquiry_status},
    },
    extensions::*,
    state::State,
};

/// Enquiry Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EnquiryStatusRequest {
    /// `new`, `read`, `replied` or `closed`.
    pub status: String,
}

/// Update Enquiry Status Handler
#[endpoint(
    tags("enquiries"),
    summary = "Update Enquiry Status",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "enquiries.update_status",
    skip(enquiry, json, depot),
    fields(enquiry_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    enquiry: PathParam<Uuid>,
    json: JsonBody<EnquiryStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<EnquiryEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let enquiry = enquiry.into_inner();
    let status = parse_enquiry_status(&json.into_inner().status)?;

    let span = tracing::Span::current();

    span.record("enquiry_uuid", tracing::field::display(enquiry));
    span.record("status", status.as_str());

    let updated = state
        .app
        .enquiries
        .update_status(enquiry.into(), status)
        .await
        .map_err(for_enquiry(enquiry))?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use expresskart_app::domain::{
        enquiries::{
            EnquiriesServiceError, MockEnquiriesService,
            records::{EnquiryStatus, EnquiryUuid},
        },
        users::records::Role,
    };

    use crate::{
        enquiries::models::tests::make_enquiry,
        test_helpers::{Mocks, service_as},
    };

    use super::*;

    fn make_service(enquiries: MockEnquiriesService) -> Service {
        service_as(
            Role::Admin,
            Mocks {
                enquiries,
                ..Mocks::default()
            },
            Router::with_path("enquiries/{enquiry}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_mark_replied() -> TestResult {
        let uuid = EnquiryUuid::new();
        let mut enquiries = MockEnquiriesService::new();

        enquiries
            .expect_update_status()
            .once()
            .withf(move |e, status| *e == uuid && *status == EnquiryStatus::Replied)
            .return_once(move |_, status| {
                let mut enquiry = make_enquiry(uuid);

                enquiry.status = status;

                Ok(enquiry)
            });

        let body: EnquiryEnvelope = TestClient::put(format!("http://example.com/enquiries/{uuid}"))
            .json(&json!({ "status": "replied" }))
            .send(&make_service(enquiries))
            .await
            .take_json()
            .await?;

        assert!(body.success);
        assert_eq!(body.data.status, "replied");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_enquiry_returns_404() -> TestResult {
        let mut enquiries = MockEnquiriesService::new();

        enquiries
            .expect_update_status()
            .once()
            .return_once(|_, _| Err(EnquiriesServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/enquiries/{}", EnquiryUuid::new()))
            .json(&json!({ "status": "read" }))
            .send(&make_service(enquiries))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
