//! Cart Records

use jiff::Timestamp;

use crate::domain::{products::records::ProductUuid, vendors::records::VendorUuid};

/// One cart line joined with the product and vendor it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_uuid: ProductUuid,
    pub title: String,
    pub image: Option<String>,
    pub unit: String,
    pub mrp: u64,
    pub unit_price: u64,
    pub quantity: u32,
    pub stock: u32,
    pub vendor_uuid: VendorUuid,
    pub vendor_name: String,
    pub vendor_delivery_fee: u64,
    pub vendor_min_order_amount: u64,
    pub added_at: Timestamp,
}
