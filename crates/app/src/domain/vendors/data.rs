//! Vendors Data

use crate::domain::vendors::records::{Address, BusinessType};

/// Business profile fields a vendor fills in, used for both create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorProfile {
    pub business_name: String,
    pub description: String,
    pub business_type: BusinessType,
    pub address: Address,
    pub contact_phone: String,
    pub contact_email: String,
}

/// Public directory filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorFilter {
    pub city: Option<String>,
    pub business_type: Option<BusinessType>,
}
