//! Reviews Data

use crate::domain::{products::records::ProductUuid, reviews::records::ReviewStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub product_uuid: ProductUuid,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
}

/// Fields a reviewer may change after posting.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewUpdate {
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Moderation {
    pub status: ReviewStatus,
    pub note: Option<String>,
}
