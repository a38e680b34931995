//! Order Models

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use expresskart_app::domain::orders::records::{
    OrderItemRecord, OrderRecord, OrderStatus, PaymentMethod, ShippingAddress,
};

use crate::extensions::*;

/// Shipping Address
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingAddressBody {
    pub name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl From<ShippingAddressBody> for ShippingAddress {
    fn from(body: ShippingAddressBody) -> Self {
        Self {
            name: body.name,
            phone: body.phone,
            street: body.street,
            city: body.city,
            state: body.state,
            pincode: body.pincode,
        }
    }
}

impl From<ShippingAddress> for ShippingAddressBody {
    fn from(address: ShippingAddress) -> Self {
        Self {
            name: address.name,
            phone: address.phone,
            street: address.street,
            city: address.city,
            state: address.state,
            pincode: address.pincode,
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub title: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            title: item.title,
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total: item.line_total,
        }
    }
}

/// Order Response
///
/// Amounts are in paise and the items are snapshots taken at checkout.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub order_number: String,
    pub user_uuid: Uuid,
    pub vendor_uuid: Uuid,
    pub status: String,
    pub payment_method: String,
    pub items: Vec<OrderItemResponse>,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub discount: u64,
    pub total: u64,
    pub discount_code: Option<String>,
    pub shipping_address: ShippingAddressBody,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into(),
            order_number: order.order_number,
            user_uuid: order.user_uuid.into(),
            vendor_uuid: order.vendor_uuid.into(),
            status: order.status.to_string(),
            payment_method: order.payment_method.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            discount: order.discount,
            total: order.total,
            discount_code: order.discount_code,
            shipping_address: order.shipping_address.into(),
            notes: order.notes,
            cancellation_reason: order.cancellation_reason,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Orders Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub count: usize,
    pub orders: Vec<OrderResponse>,
}

impl From<Vec<OrderRecord>> for OrdersResponse {
    fn from(orders: Vec<OrderRecord>) -> Self {
        Self {
            count: orders.len(),
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}

/// Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatusRequest {
    /// One of `pending`, `confirmed`, `preparing`, `out_for_delivery`,
    /// `delivered` or `cancelled`.
    pub status: String,
}

pub(crate) fn parse_order_status(value: &str) -> Result<OrderStatus, StatusError> {
    value.parse::<OrderStatus>().or_400("invalid order status")
}

pub(crate) fn parse_payment_method(value: &str) -> Result<PaymentMethod, StatusError> {
    value.parse::<PaymentMethod>().or_400("invalid payment method")
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use expresskart_app::domain::{
        orders::records::{
            OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid, PaymentMethod,
            ShippingAddress,
        },
        products::records::ProductUuid,
        users::records::UserUuid,
        vendors::records::VendorUuid,
    };

    pub(crate) fn make_order(uuid: OrderUuid, buyer: UserUuid, status: OrderStatus) -> OrderRecord {
        OrderRecord {
            uuid,
            order_number: "EK-20260101-0000ABCD".to_string(),
            user_uuid: buyer,
            vendor_uuid: VendorUuid::new(),
            status,
            payment_method: PaymentMethod::Cod,
            subtotal: 30_000,
            delivery_fee: 5_000,
            discount: 0,
            total: 35_000,
            discount_code: None,
            shipping_address: ShippingAddress {
                name: "Asha Rao".to_string(),
                phone: "9811111111".to_string(),
                street: "4 Lake View".to_string(),
                city: "Pune".to_string(),
                state: "Maharashtra".to_string(),
                pincode: "411004".to_string(),
            },
            notes: None,
            cancellation_reason: None,
            items: vec![OrderItemRecord {
                uuid: OrderItemUuid::new(),
                order_uuid: uuid,
                product_uuid: ProductUuid::new(),
                title: "Masala Chai 250g".to_string(),
                unit_price: 10_000,
                quantity: 3,
                line_total: 30_000,
            }],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
