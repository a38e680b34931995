//! Order Records

use std::{fmt, str::FromStr};

use jiff::{Timestamp, tz::TimeZone};
use rand::{RngCore, rngs::OsRng};

use crate::{
    domain::{
        ParseValueError, products::records::ProductUuid, users::records::UserUuid,
        vendors::records::VendorUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether an order may move from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Preparing | Self::Cancelled)
                | (Self::Preparing, Self::OutForDelivery)
                | (Self::OutForDelivery, Self::Delivered)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ParseValueError::new("order status", value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Cod,
    Online,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cod => "cod",
            Self::Online => "online",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cod" => Ok(Self::Cod),
            "online" => Ok(Self::Online),
            _ => Err(ParseValueError::new("payment method", value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// Order Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub title: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub user_uuid: UserUuid,
    pub vendor_uuid: VendorUuid,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub discount: u64,
    pub total: u64,
    pub discount_code: Option<String>,
    pub shipping_address: ShippingAddress,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Human-facing order reference, `EK-<yyyymmdd>-<8 hex>`.
#[must_use]
pub fn order_number(at: Timestamp) -> String {
    let date = at.to_zoned(TimeZone::UTC).date();

    format!(
        "EK-{:04}{:02}{:02}-{:08X}",
        date.year(),
        date.month(),
        date.day(),
        OsRng.next_u32()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions_are_allowed() {
        use OrderStatus::*;

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(OutForDelivery));
        assert!(OutForDelivery.can_transition_to(Delivered));
    }

    #[test]
    fn cancellation_only_before_preparation() {
        use OrderStatus::*;

        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Preparing.can_transition_to(Cancelled));
        assert!(!OutForDelivery.can_transition_to(Cancelled));
    }

    #[test]
    fn terminal_states_and_skips_are_rejected() {
        use OrderStatus::*;

        for next in OrderStatus::ALL {
            assert!(!Delivered.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }

        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Preparing.can_transition_to(Confirmed));
    }

    #[test]
    fn statuses_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }

        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn order_number_has_date_and_hex_suffix() -> Result<(), jiff::Error> {
        let at: Timestamp = "2026-03-09T18:30:00Z".parse()?;
        let number = order_number(at);

        assert!(number.starts_with("EK-20260309-"), "got {number}");
        assert_eq!(number.len(), "EK-20260309-".len() + 8);
        assert!(number[12..].chars().all(|c| c.is_ascii_hexdigit()));

        Ok(())
    }
}
