//! Dashboard Records

use rustc_hash::FxHashMap;

use crate::domain::{orders::records::OrderStatus, users::records::Role};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserStats {
    pub total: u64,
    pub by_role: FxHashMap<Role, u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VendorStats {
    pub total: u64,
    pub verified: u64,
    pub pending: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProductStats {
    pub total: u64,
    pub active: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderStats {
    pub total: u64,
    pub by_status: FxHashMap<OrderStatus, u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReviewStats {
    pub total: u64,
    pub pending: u64,
}

/// Platform-wide figures for the admin dashboard. Revenue counts delivered
/// orders only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlatformStats {
    pub users: UserStats,
    pub vendors: VendorStats,
    pub products: ProductStats,
    pub orders: OrderStats,
    pub revenue: u64,
    pub reviews: ReviewStats,
    pub new_enquiries: u64,
}
