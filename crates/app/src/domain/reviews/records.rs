//! Review Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{
    domain::{
        ParseValueError, products::records::ProductUuid, users::records::UserUuid,
        vendors::records::VendorUuid,
    },
    uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<ReviewRecord>;

/// Lowest and highest star ratings.
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReviewStatus {
    #[default]
    Approved,
    Pending,
    Rejected,
}

impl ReviewStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "approved" => Ok(Self::Approved),
            "pending" => Ok(Self::Pending),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseValueError::new("review status", value)),
        }
    }
}

/// Review Record
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub uuid: ReviewUuid,
    pub product_uuid: ProductUuid,
    pub vendor_uuid: VendorUuid,
    pub user_uuid: UserUuid,
    pub reviewer_name: String,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: String,
    pub status: ReviewStatus,
    pub is_verified_purchase: bool,
    pub moderation_note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
