//! Vendors Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{
        amount_to_i64, count_to_i32, try_get_amount, try_get_count, try_get_enum, try_get_tally,
    },
    domain::{
        orders::records::OrderStatus,
        users::records::UserUuid,
        vendors::{
            data::{VendorFilter, VendorProfile},
            records::{
                Address, DeliverySettings, VendorDashboard, VendorRecord, VendorStatus, VendorUuid,
            },
        },
    },
};

const LIST_PUBLIC_VENDORS_SQL: &str = include_str!("sql/list_public_vendors.sql");
const LIST_VENDORS_SQL: &str = include_str!("sql/list_vendors.sql");
const GET_VENDOR_SQL: &str = include_str!("sql/get_vendor.sql");
const FIND_VENDOR_BY_USER_SQL: &str = include_str!("sql/find_vendor_by_user.sql");
const CREATE_VENDOR_SQL: &str = include_str!("sql/create_vendor.sql");
const UPDATE_VENDOR_PROFILE_SQL: &str = include_str!("sql/update_vendor_profile.sql");
const UPDATE_DELIVERY_SETTINGS_SQL: &str = include_str!("sql/update_delivery_settings.sql");
const SET_VENDOR_VERIFIED_SQL: &str = include_str!("sql/set_vendor_verified.sql");
const SET_VENDOR_STATUS_SQL: &str = include_str!("sql/set_vendor_status.sql");
const DELETE_VENDOR_SQL: &str = include_str!("sql/delete_vendor.sql");
const VENDOR_DASHBOARD_SQL: &str = include_str!("sql/vendor_dashboard.sql");
const VENDOR_ORDER_COUNTS_SQL: &str = include_str!("sql/vendor_order_counts.sql");

/// Products with fewer units than this count as low on stock.
pub(crate) const LOW_STOCK_THRESHOLD: i32 = 10;

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVendorsRepository;

impl PgVendorsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_public_vendors(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &VendorFilter,
    ) -> Result<Vec<VendorRecord>, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(LIST_PUBLIC_VENDORS_SQL)
            .bind(filter.city.as_deref())
            .bind(filter.business_type.map(|kind| kind.as_str()))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_vendors(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<VendorStatus>,
    ) -> Result<Vec<VendorRecord>, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(LIST_VENDORS_SQL)
            .bind(status.map(VendorStatus::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(GET_VENDOR_SQL)
            .bind(vendor.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_vendor_by_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(FIND_VENDOR_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
        user: UserUuid,
        profile: &VendorProfile,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(CREATE_VENDOR_SQL)
            .bind(vendor.into_uuid())
            .bind(user.into_uuid())
            .bind(&profile.business_name)
            .bind(&profile.description)
            .bind(profile.business_type.as_str())
            .bind(&profile.address.street)
            .bind(&profile.address.city)
            .bind(&profile.address.state)
            .bind(&profile.address.pincode)
            .bind(&profile.contact_phone)
            .bind(&profile.contact_email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_vendor_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        profile: &VendorProfile,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(UPDATE_VENDOR_PROFILE_SQL)
            .bind(user.into_uuid())
            .bind(&profile.business_name)
            .bind(&profile.description)
            .bind(profile.business_type.as_str())
            .bind(&profile.address.street)
            .bind(&profile.address.city)
            .bind(&profile.address.state)
            .bind(&profile.address.pincode)
            .bind(&profile.contact_phone)
            .bind(&profile.contact_email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_delivery_settings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        settings: DeliverySettings,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(UPDATE_DELIVERY_SETTINGS_SQL)
            .bind(user.into_uuid())
            .bind(count_to_i32(
                "delivery_radius_km",
                settings.delivery_radius_km,
            )?)
            .bind(amount_to_i64("min_order_amount", settings.min_order_amount)?)
            .bind(amount_to_i64("delivery_fee", settings.delivery_fee)?)
            .bind(count_to_i32(
                "estimated_delivery_minutes",
                settings.estimated_delivery_minutes,
            )?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_verified(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
        is_verified: bool,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(SET_VENDOR_VERIFIED_SQL)
            .bind(vendor.into_uuid())
            .bind(is_verified)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
        status: VendorStatus,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(SET_VENDOR_STATUS_SQL)
            .bind(vendor.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_VENDOR_SQL)
            .bind(vendor.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn dashboard(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<VendorDashboard, sqlx::Error> {
        let row = query(VENDOR_DASHBOARD_SQL)
            .bind(vendor.into_uuid())
            .bind(LOW_STOCK_THRESHOLD)
            .fetch_one(&mut **tx)
            .await?;

        let counts = query(VENDOR_ORDER_COUNTS_SQL)
            .bind(vendor.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        let mut orders_by_status = FxHashMap::default();

        for count in &counts {
            orders_by_status.insert(
                try_get_enum::<OrderStatus>(count, "status")?,
                try_get_tally(count, "orders")?,
            );
        }

        Ok(VendorDashboard {
            total_products: try_get_tally(&row, "total_products")?,
            active_products: try_get_tally(&row, "active_products")?,
            low_stock_products: try_get_tally(&row, "low_stock_products")?,
            orders_by_status,
            revenue: try_get_amount(&row, "revenue")?,
            rating_average: row.try_get("rating_average")?,
            rating_count: try_get_tally(&row, "rating_count")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VendorRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VendorUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            business_name: row.try_get("business_name")?,
            description: row.try_get("description")?,
            business_type: try_get_enum(row, "business_type")?,
            address: Address {
                street: row.try_get("street")?,
                city: row.try_get("city")?,
                state: row.try_get("state")?,
                pincode: row.try_get("pincode")?,
            },
            contact_phone: row.try_get("contact_phone")?,
            contact_email: row.try_get("contact_email")?,
            delivery: DeliverySettings {
                delivery_radius_km: try_get_count(row, "delivery_radius_km")?,
                min_order_amount: try_get_amount(row, "min_order_amount")?,
                delivery_fee: try_get_amount(row, "delivery_fee")?,
                estimated_delivery_minutes: try_get_count(row, "estimated_delivery_minutes")?,
            },
            status: try_get_enum(row, "status")?,
            is_verified: row.try_get("is_verified")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
