//! Enquiry Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{domain::ParseValueError, uuids::TypedUuid};

/// Enquiry UUID
pub type EnquiryUuid = TypedUuid<EnquiryRecord>;

/// Where an enquiry sits in the support inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnquiryStatus {
    #[default]
    New,
    Read,
    Replied,
    Closed,
}

impl EnquiryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnquiryStatus {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseValueError::new("enquiry status", value)),
        }
    }
}

/// Enquiry Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnquiryRecord {
    pub uuid: EnquiryUuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: EnquiryStatus,
    pub created_at: Timestamp,
}
