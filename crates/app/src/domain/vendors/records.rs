//! Vendor Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rustc_hash::FxHashMap;

use crate::{
    domain::{ParseValueError, orders::records::OrderStatus, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Vendor UUID
pub type VendorUuid = TypedUuid<VendorRecord>;

/// Delivery fee charged when a vendor hasn't configured one, in paise.
pub const DEFAULT_DELIVERY_FEE: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessType {
    Grocery,
    Restaurant,
    Pharmacy,
    Electronics,
    Clothing,
    General,
    Other,
}

impl BusinessType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grocery => "grocery",
            Self::Restaurant => "restaurant",
            Self::Pharmacy => "pharmacy",
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::General => "general",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessType {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "grocery" => Ok(Self::Grocery),
            "restaurant" => Ok(Self::Restaurant),
            "pharmacy" => Ok(Self::Pharmacy),
            "electronics" => Ok(Self::Electronics),
            "clothing" => Ok(Self::Clothing),
            "general" => Ok(Self::General),
            "other" => Ok(Self::Other),
            _ => Err(ParseValueError::new("business type", value)),
        }
    }
}

/// Moderation state of a vendor. Only `Active` vendors are listed publicly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorStatus {
    Pending,
    Active,
    Suspended,
    Inactive,
}

impl VendorStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VendorStatus {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            "inactive" => Ok(Self::Inactive),
            _ => Err(ParseValueError::new("vendor status", value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// How far and for how much a vendor delivers. Amounts are in paise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliverySettings {
    pub delivery_radius_km: u32,
    pub min_order_amount: u64,
    pub delivery_fee: u64,
    pub estimated_delivery_minutes: u32,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            delivery_radius_km: 5,
            min_order_amount: 0,
            delivery_fee: DEFAULT_DELIVERY_FEE,
            estimated_delivery_minutes: 30,
        }
    }
}

/// Vendor Record
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRecord {
    pub uuid: VendorUuid,
    pub user_uuid: UserUuid,
    pub business_name: String,
    pub description: String,
    pub business_type: BusinessType,
    pub address: Address,
    pub contact_phone: String,
    pub contact_email: String,
    pub delivery: DeliverySettings,
    pub status: VendorStatus,
    pub is_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Figures shown on a vendor's own dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VendorDashboard {
    pub total_products: u64,
    pub active_products: u64,
    pub low_stock_products: u64,
    pub orders_by_status: FxHashMap<OrderStatus, u64>,
    pub revenue: u64,
    pub rating_average: f64,
    pub rating_count: u64,
}

impl VendorDashboard {
    #[must_use]
    pub fn total_orders(&self) -> u64 {
        self.orders_by_status.values().sum()
    }
}
