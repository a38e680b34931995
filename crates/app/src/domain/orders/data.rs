//! Orders Data

use crate::domain::orders::records::{PaymentMethod, ShippingAddress};

/// Checkout request. Items come from the caller's cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub discount_code: Option<String>,
    pub notes: Option<String>,
}
