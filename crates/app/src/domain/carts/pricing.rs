//! Cart pricing.
//!
//! Groups cart lines by vendor and works out subtotals, delivery fees,
//! discounts, and totals. All amounts are paise. Nothing here touches the
//! database, so checkout and the cart view price a cart the same way.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::domain::{carts::records::CartLine, vendors::records::VendorUuid};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("discount code {0:?} is not valid")]
pub struct InvalidDiscountCode(pub String);

/// Promotional codes accepted at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountCode {
    Welcome10,
    Save20,
    FreeDelivery,
}

impl DiscountCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Welcome10 => "WELCOME10",
            Self::Save20 => "SAVE20",
            Self::FreeDelivery => "FREEDEL",
        }
    }

    /// Percentage taken off the subtotal.
    #[must_use]
    pub const fn percentage(self) -> u64 {
        match self {
            Self::Welcome10 => 10,
            Self::Save20 => 20,
            Self::FreeDelivery => 0,
        }
    }

    #[must_use]
    pub const fn free_delivery(self) -> bool {
        matches!(self, Self::FreeDelivery)
    }

    /// Parse an optional, user-typed code. Blank input means no code.
    ///
    /// # Errors
    ///
    /// Returns an error when a non-blank code is not recognised.
    pub fn parse_optional(code: Option<&str>) -> Result<Option<Self>, InvalidDiscountCode> {
        match code.map(str::trim) {
            None | Some("") => Ok(None),
            Some(code) => code.parse().map(Some),
        }
    }
}

impl fmt::Display for DiscountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountCode {
    type Err = InvalidDiscountCode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "WELCOME10" => Ok(Self::Welcome10),
            "SAVE20" => Ok(Self::Save20),
            "FREEDEL" => Ok(Self::FreeDelivery),
            _ => Err(InvalidDiscountCode(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub line: CartLine,
    pub line_total: u64,
}

/// Lines from one vendor, priced as that vendor's share of the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorGroup {
    pub vendor_uuid: VendorUuid,
    pub vendor_name: String,
    pub min_order_amount: u64,
    pub lines: SmallVec<[PricedLine; 4]>,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub discount: u64,
    pub total: u64,
}

impl VendorGroup {
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.line.quantity)).sum()
    }

    #[must_use]
    pub fn meets_minimum(&self) -> bool {
        self.subtotal >= self.min_order_amount
    }
}

/// A fully priced cart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartSummary {
    pub groups: Vec<VendorGroup>,
    pub discount_code: Option<DiscountCode>,
    pub item_count: u64,
    pub subtotal: u64,
    pub delivery_total: u64,
    pub discount: u64,
    pub total: u64,
}

impl CartSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn percent_of(amount: u64, percentage: u64) -> u64 {
    let discount = u128::from(amount) * u128::from(percentage) / 100;

    u64::try_from(discount).unwrap_or(u64::MAX)
}

/// Group lines by vendor, in first-seen order, and price every group.
#[must_use]
pub fn price_cart(lines: Vec<CartLine>, code: Option<DiscountCode>) -> CartSummary {
    let percentage = code.map_or(0, DiscountCode::percentage);
    let free_delivery = code.is_some_and(DiscountCode::free_delivery);

    let mut index: FxHashMap<VendorUuid, usize> = FxHashMap::default();
    let mut groups: Vec<VendorGroup> = Vec::new();

    for line in lines {
        let line_total = line.unit_price.saturating_mul(u64::from(line.quantity));

        let position = *index.entry(line.vendor_uuid).or_insert_with(|| {
            groups.push(VendorGroup {
                vendor_uuid: line.vendor_uuid,
                vendor_name: line.vendor_name.clone(),
                min_order_amount: line.vendor_min_order_amount,
                lines: SmallVec::new(),
                subtotal: 0,
                delivery_fee: if free_delivery {
                    0
                } else {
                    line.vendor_delivery_fee
                },
                discount: 0,
                total: 0,
            });

            groups.len() - 1
        });

        let Some(group) = groups.get_mut(position) else {
            continue;
        };

        group.subtotal = group.subtotal.saturating_add(line_total);
        group.lines.push(PricedLine { line, line_total });
    }

    let mut summary = CartSummary {
        discount_code: code,
        ..CartSummary::default()
    };

    for group in &mut groups {
        group.discount = percent_of(group.subtotal, percentage);
        group.total = group
            .subtotal
            .saturating_add(group.delivery_fee)
            .saturating_sub(group.discount);

        summary.item_count = summary.item_count.saturating_add(group.item_count());
        summary.subtotal = summary.subtotal.saturating_add(group.subtotal);
        summary.delivery_total = summary.delivery_total.saturating_add(group.delivery_fee);
    }

    summary.discount = percent_of(summary.subtotal, percentage);
    summary.total = summary
        .subtotal
        .saturating_add(summary.delivery_total)
        .saturating_sub(summary.discount);
    summary.groups = groups;

    summary
}
