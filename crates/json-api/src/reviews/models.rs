//! Review Models

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use expresskart_app::domain::reviews::{
    data::ReviewUpdate,
    records::{ReviewRecord, ReviewStatus},
};

use crate::extensions::*;

/// Review Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub vendor_uuid: Uuid,
    pub user_uuid: Uuid,
    pub reviewer_name: String,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
    pub status: String,

    /// Set when the reviewer has a delivered order containing the product.
    pub is_verified_purchase: bool,

    pub moderation_note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ReviewRecord> for ReviewResponse {
    fn from(review: ReviewRecord) -> Self {
        Self {
            uuid: review.uuid.into(),
            product_uuid: review.product_uuid.into(),
            vendor_uuid: review.vendor_uuid.into(),
            user_uuid: review.user_uuid.into(),
            reviewer_name: review.reviewer_name,
            rating: review.rating,
            title: review.title,
            comment: review.comment,
            status: review.status.to_string(),
            is_verified_purchase: review.is_verified_purchase,
            moderation_note: review.moderation_note,
            created_at: review.created_at.to_string(),
            updated_at: review.updated_at.to_string(),
        }
    }
}

/// Reviews Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewsResponse {
    pub count: usize,
    pub reviews: Vec<ReviewResponse>,
}

impl From<Vec<ReviewRecord>> for ReviewsResponse {
    fn from(reviews: Vec<ReviewRecord>) -> Self {
        Self {
            count: reviews.len(),
            reviews: reviews.into_iter().map(Into::into).collect(),
        }
    }
}

/// Review Body
///
/// Rating, title and comment shared by creates and updates.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewBody {
    /// 1 to 5.
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
}

impl From<ReviewBody> for ReviewUpdate {
    fn from(body: ReviewBody) -> Self {
        Self {
            rating: body.rating,
            title: body.title,
            comment: body.comment,
        }
    }
}

pub(crate) fn parse_review_status(value: &str) -> Result<ReviewStatus, StatusError> {
    value.parse::<ReviewStatus>().or_400("invalid review status")
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use expresskart_app::domain::{
        products::records::ProductUuid,
        reviews::records::{ReviewRecord, ReviewStatus, ReviewUuid},
        users::records::UserUuid,
        vendors::records::VendorUuid,
    };

    pub(crate) fn make_review(uuid: ReviewUuid, author: UserUuid, product: ProductUuid) -> ReviewRecord {
        ReviewRecord {
            uuid,
            product_uuid: product,
            vendor_uuid: VendorUuid::new(),
            user_uuid: author,
            reviewer_name: "Asha Rao".to_string(),
            rating: 4,
            title: Some("Fresh stock".to_string()),
            comment: "Arrived quickly and well packed".to_string(),
            status: ReviewStatus::Approved,
            is_verified_purchase: true,
            moderation_note: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
