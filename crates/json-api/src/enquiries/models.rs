//! Enquiry Models
//!
//! Enquiry responses are wrapped in a `{ success, data }` envelope.

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use expresskart_app::domain::enquiries::{
    data::NewEnquiry,
    records::{EnquiryRecord, EnquiryStatus},
};

use crate::extensions::*;

/// Enquiry Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EnquiryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: String,
}

impl From<EnquiryRecord> for EnquiryResponse {
    fn from(enquiry: EnquiryRecord) -> Self {
        Self {
            uuid: enquiry.uuid.into(),
            name: enquiry.name,
            email: enquiry.email,
            subject: enquiry.subject,
            message: enquiry.message,
            status: enquiry.status.to_string(),
            created_at: enquiry.created_at.to_string(),
        }
    }
}

/// Single Enquiry Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EnquiryEnvelope {
    pub success: bool,
    pub data: EnquiryResponse,
}

impl From<EnquiryRecord> for EnquiryEnvelope {
    fn from(enquiry: EnquiryRecord) -> Self {
        Self {
            success: true,
            data: enquiry.into(),
        }
    }
}

/// Enquiry List Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EnquiriesEnvelope {
    pub success: bool,
    pub count: usize,
    pub data: Vec<EnquiryResponse>,
}

impl From<Vec<EnquiryRecord>> for EnquiriesEnvelope {
    fn from(enquiries: Vec<EnquiryRecord>) -> Self {
        Self {
            success: true,
            count: enquiries.len(),
            data: enquiries.into_iter().map(Into::into).collect(),
        }
    }
}

/// Serializes as `{}`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct Empty {}

/// Deleted Enquiry Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeletedEnvelope {
    pub success: bool,
    pub data: Empty,
}

/// Enquiry Request
///
/// Missing fields deserialize as empty strings so the service can reject
/// them with its own message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EnquiryRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub message: String,
}

impl From<EnquiryRequest> for NewEnquiry {
    fn from(request: EnquiryRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            subject: request.subject,
            message: request.message,
        }
    }
}

pub(crate) fn parse_enquiry_status(value: &str) -> Result<EnquiryStatus, StatusError> {
    value.parse::<EnquiryStatus>().or_400("invalid enquiry status")
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use expresskart_app::domain::enquiries::records::{EnquiryRecord, EnquiryStatus, EnquiryUuid};

    use super::*;

    pub(crate) fn make_enquiry(uuid: EnquiryUuid) -> EnquiryRecord {
        EnquiryRecord {
            uuid,
            name: "Ravi Kumar".to_string(),
            email: "ravi@example.com".to_string(),
            subject: "Bulk order".to_string(),
            message: "Do you deliver to Mysuru?".to_string(),
            status: EnquiryStatus::New,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn deleted_envelope_has_empty_data() -> Result<(), serde_json::Error> {
        let body = serde_json::to_value(DeletedEnvelope {
            success: true,
            data: Empty::default(),
        })?;

        assert_eq!(body, serde_json::json!({ "success": true, "data": {} }));

        Ok(())
    }
}
