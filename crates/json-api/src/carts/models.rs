//! Cart Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use expresskart_app::domain::carts::pricing::{CartSummary, PricedLine, VendorGroup};

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub product_uuid: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub unit: String,
    pub mrp: u64,
    pub unit_price: u64,
    pub quantity: u32,

    /// Units currently in stock.
    pub stock: u32,

    pub line_total: u64,
    pub added_at: String,
}

impl From<PricedLine> for CartLineResponse {
    fn from(priced: PricedLine) -> Self {
        let line = priced.line;

        Self {
            product_uuid: line.product_uuid.into(),
            title: line.title,
            image: line.image,
            unit: line.unit,
            mrp: line.mrp,
            unit_price: line.unit_price,
            quantity: line.quantity,
            stock: line.stock,
            line_total: priced.line_total,
            added_at: line.added_at.to_string(),
        }
    }
}

/// One vendor's share of the cart
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorGroupResponse {
    pub vendor_uuid: Uuid,
    pub vendor_name: String,
    pub items: Vec<CartLineResponse>,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub discount: u64,
    pub total: u64,
    pub min_order_amount: u64,

    /// Whether the subtotal reaches the vendor's minimum order.
    pub meets_minimum: bool,
}

impl From<VendorGroup> for VendorGroupResponse {
    fn from(group: VendorGroup) -> Self {
        Self {
            meets_minimum: group.meets_minimum(),
            vendor_uuid: group.vendor_uuid.into(),
            vendor_name: group.vendor_name,
            items: group.lines.into_iter().map(Into::into).collect(),
            subtotal: group.subtotal,
            delivery_fee: group.delivery_fee,
            discount: group.discount,
            total: group.total,
            min_order_amount: group.min_order_amount,
        }
    }
}

/// Cart Response
///
/// All amounts are in paise.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub vendors: Vec<VendorGroupResponse>,
    pub discount_code: Option<String>,
    pub item_count: u64,
    pub subtotal: u64,
    pub delivery_total: u64,
    pub discount: u64,
    pub total: u64,
}

impl From<CartSummary> for CartResponse {
    fn from(summary: CartSummary) -> Self {
        Self {
            vendors: summary.groups.into_iter().map(Into::into).collect(),
            discount_code: summary.discount_code.map(|code| code.as_str().to_string()),
            item_count: summary.item_count,
            subtotal: summary.subtotal,
            delivery_total: summary.delivery_total,
            discount: summary.discount,
            total: summary.total,
        }
    }
}
