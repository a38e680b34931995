//! Vendor Models

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use expresskart_app::domain::vendors::{
    data::VendorProfile,
    records::{Address, BusinessType, DeliverySettings, VendorDashboard, VendorRecord, VendorStatus},
};

use crate::extensions::*;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressBody {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl From<AddressBody> for Address {
    fn from(body: AddressBody) -> Self {
        Address {
            street: body.street,
            city: body.city,
            state: body.state,
            pincode: body.pincode,
        }
    }
}

impl From<Address> for AddressBody {
    fn from(address: Address) -> Self {
        AddressBody {
            street: address.street,
            city: address.city,
            state: address.state,
            pincode: address.pincode,
        }
    }
}

/// Delivery settings. Amounts are paise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliverySettingsBody {
    pub delivery_radius_km: u32,
    pub min_order_amount: u64,
    pub delivery_fee: u64,
    pub estimated_delivery_minutes: u32,
}

impl From<DeliverySettingsBody> for DeliverySettings {
    fn from(body: DeliverySettingsBody) -> Self {
        DeliverySettings {
            delivery_radius_km: body.delivery_radius_km,
            min_order_amount: body.min_order_amount,
            delivery_fee: body.delivery_fee,
            estimated_delivery_minutes: body.estimated_delivery_minutes,
        }
    }
}

impl From<DeliverySettings> for DeliverySettingsBody {
    fn from(settings: DeliverySettings) -> Self {
        DeliverySettingsBody {
            delivery_radius_km: settings.delivery_radius_km,
            min_order_amount: settings.min_order_amount,
            delivery_fee: settings.delivery_fee,
            estimated_delivery_minutes: settings.estimated_delivery_minutes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub business_name: String,
    pub description: String,
    pub business_type: String,
    pub address: AddressBody,
    pub contact_phone: String,
    pub contact_email: String,
    pub delivery: DeliverySettingsBody,
    pub status: String,
    pub is_verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<VendorRecord> for VendorResponse {
    fn from(vendor: VendorRecord) -> Self {
        VendorResponse {
            uuid: vendor.uuid.into(),
            user_uuid: vendor.user_uuid.into(),
            business_name: vendor.business_name,
            description: vendor.description,
            business_type: vendor.business_type.to_string(),
            address: vendor.address.into(),
            contact_phone: vendor.contact_phone,
            contact_email: vendor.contact_email,
            delivery: vendor.delivery.into(),
            status: vendor.status.to_string(),
            is_verified: vendor.is_verified,
            created_at: vendor.created_at.to_string(),
            updated_at: vendor.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorsResponse {
    pub count: usize,
    pub vendors: Vec<VendorResponse>,
}

impl From<Vec<VendorRecord>> for VendorsResponse {
    fn from(vendors: Vec<VendorRecord>) -> Self {
        VendorsResponse {
            count: vendors.len(),
            vendors: vendors.into_iter().map(Into::into).collect(),
        }
    }
}

/// Vendor Profile Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorProfileRequest {
    pub business_name: String,
    #[serde(default)]
    pub description: String,

    /// `grocery`, `restaurant`, `pharmacy`, `electronics`, `clothing`,
    /// `general` or `other`
    pub business_type: String,
    pub address: AddressBody,
    pub contact_phone: String,
    pub contact_email: String,
}

impl TryFrom<VendorProfileRequest> for VendorProfile {
    type Error = StatusError;

    fn try_from(request: VendorProfileRequest) -> Result<Self, Self::Error> {
        Ok(VendorProfile {
            business_type: parse_business_type(&request.business_type)?,
            business_name: request.business_name,
            description: request.description,
            address: request.address.into(),
            contact_phone: request.contact_phone,
            contact_email: request.contact_email,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// Figures for the vendor's own dashboard.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorDashboardResponse {
    pub total_products: u64,
    pub active_products: u64,
    pub low_stock_products: u64,
    pub total_orders: u64,
    pub orders_by_status: Vec<StatusCount>,

    /// Delivered order totals, paise
    pub revenue: u64,
    pub rating_average: f64,
    pub rating_count: u64,
}

impl From<VendorDashboard> for VendorDashboardResponse {
    fn from(dashboard: VendorDashboard) -> Self {
        let total_orders = dashboard.total_orders();

        let mut orders_by_status: Vec<StatusCount> = dashboard
            .orders_by_status
            .into_iter()
            .map(|(status, count)| StatusCount {
                status: status.to_string(),
                count,
            })
            .collect();

        orders_by_status.sort_by(|a, b| a.status.cmp(&b.status));

        VendorDashboardResponse {
            total_products: dashboard.total_products,
            active_products: dashboard.active_products,
            low_stock_products: dashboard.low_stock_products,
            total_orders,
            orders_by_status,
            revenue: dashboard.revenue,
            rating_average: dashboard.rating_average,
            rating_count: dashboard.rating_count,
        }
    }
}

pub(crate) fn parse_business_type(value: &str) -> Result<BusinessType, StatusError> {
    value.parse::<BusinessType>().or_400("invalid business type")
}

pub(crate) fn parse_vendor_status(value: &str) -> Result<VendorStatus, StatusError> {
    value.parse::<VendorStatus>().or_400("invalid vendor status")
}
