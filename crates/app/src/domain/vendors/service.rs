//! Vendors service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::{Db, MAX_AMOUNT, MAX_COUNT},
    domain::{
        required,
        users::records::UserUuid,
        vendors::{
            data::{VendorFilter, VendorProfile},
            errors::VendorsServiceError,
            records::{
                Address, DeliverySettings, VendorDashboard, VendorRecord, VendorStatus, VendorUuid,
            },
            repository::PgVendorsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgVendorsService {
    db: Db,
    repository: PgVendorsRepository,
}

impl PgVendorsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgVendorsRepository::new(),
        }
    }
}

fn clean_profile(profile: VendorProfile) -> Result<VendorProfile, VendorsServiceError> {
    let missing = || VendorsServiceError::MissingRequiredData;

    Ok(VendorProfile {
        business_name: required(&profile.business_name).ok_or_else(missing)?,
        description: profile.description.trim().to_string(),
        business_type: profile.business_type,
        address: Address {
            street: required(&profile.address.street).ok_or_else(missing)?,
            city: required(&profile.address.city).ok_or_else(missing)?,
            state: required(&profile.address.state).ok_or_else(missing)?,
            pincode: required(&profile.address.pincode).ok_or_else(missing)?,
        },
        contact_phone: required(&profile.contact_phone).ok_or_else(missing)?,
        contact_email: required(&profile.contact_email)
            .ok_or_else(missing)?
            .to_lowercase(),
    })
}

fn check_delivery_settings(settings: &DeliverySettings) -> Result<(), VendorsServiceError> {
    let zero = settings.delivery_radius_km == 0 || settings.estimated_delivery_minutes == 0;
    let unstorable = settings.delivery_radius_km > MAX_COUNT
        || settings.estimated_delivery_minutes > MAX_COUNT
        || settings.min_order_amount > MAX_AMOUNT
        || settings.delivery_fee > MAX_AMOUNT;

    if zero || unstorable {
        return Err(VendorsServiceError::InvalidData);
    }

    Ok(())
}

#[async_trait]
impl VendorsService for PgVendorsService {
    async fn list_public_vendors(
        &self,
        filter: VendorFilter,
    ) -> Result<Vec<VendorRecord>, VendorsServiceError> {
        let filter = VendorFilter {
            city: filter.city.as_deref().and_then(required),
            business_type: filter.business_type,
        };

        let mut tx = self.db.begin().await?;

        let vendors = self.repository.list_public_vendors(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(vendors)
    }

    async fn list_vendors(
        &self,
        status: Option<VendorStatus>,
    ) -> Result<Vec<VendorRecord>, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendors = self.repository.list_vendors(&mut tx, status).await?;

        tx.commit().await?;

        Ok(vendors)
    }

    async fn get_vendor(&self, vendor: VendorUuid) -> Result<VendorRecord, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendor = self.repository.get_vendor(&mut tx, vendor).await?;

        tx.commit().await?;

        Ok(vendor)
    }

    async fn get_profile(&self, user: UserUuid) -> Result<VendorRecord, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendor = self.repository.find_vendor_by_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(vendor)
    }

    #[tracing::instrument(
        name = "vendors.create_profile",
        skip(self, profile),
        fields(user_uuid = %user),
        err
    )]
    async fn create_profile(
        &self,
        user: UserUuid,
        profile: VendorProfile,
    ) -> Result<VendorRecord, VendorsServiceError> {
        let profile = clean_profile(profile)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_vendor(&mut tx, VendorUuid::new(), user, &profile)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "vendors.update_profile",
        skip(self, profile),
        fields(user_uuid = %user),
        err
    )]
    async fn update_profile(
        &self,
        user: UserUuid,
        profile: VendorProfile,
    ) -> Result<VendorRecord, VendorsServiceError> {
        let profile = clean_profile(profile)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_vendor_profile(&mut tx, user, &profile)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "vendors.update_delivery_settings",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn update_delivery_settings(
        &self,
        user: UserUuid,
        settings: DeliverySettings,
    ) -> Result<VendorRecord, VendorsServiceError> {
        check_delivery_settings(&settings)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_delivery_settings(&mut tx, user, settings)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn dashboard(&self, user: UserUuid) -> Result<VendorDashboard, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendor = self.repository.find_vendor_by_user(&mut tx, user).await?;
        let dashboard = self.repository.dashboard(&mut tx, vendor.uuid).await?;

        tx.commit().await?;

        Ok(dashboard)
    }

    #[tracing::instrument(name = "vendors.set_verified", skip(self), fields(vendor_uuid = %vendor), err)]
    async fn set_verified(
        &self,
        vendor: VendorUuid,
        is_verified: bool,
    ) -> Result<VendorRecord, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .set_verified(&mut tx, vendor, is_verified)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(name = "vendors.set_status", skip(self), fields(vendor_uuid = %vendor), err)]
    async fn set_status(
        &self,
        vendor: VendorUuid,
        status: VendorStatus,
    ) -> Result<VendorRecord, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.set_status(&mut tx, vendor, status).await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(name = "vendors.delete", skip(self), fields(vendor_uuid = %vendor), err)]
    async fn delete_vendor(&self, vendor: VendorUuid) -> Result<(), VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_vendor(&mut tx, vendor).await?;

        if rows_affected == 0 {
            return Err(VendorsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait VendorsService: Send + Sync {
    /// Active, verified vendors for the public directory.
    async fn list_public_vendors(
        &self,
        filter: VendorFilter,
    ) -> Result<Vec<VendorRecord>, VendorsServiceError>;

    /// Every vendor, newest first, optionally restricted to one status.
    async fn list_vendors(
        &self,
        status: Option<VendorStatus>,
    ) -> Result<Vec<VendorRecord>, VendorsServiceError>;

    /// Retrieve a single vendor.
    async fn get_vendor(&self, vendor: VendorUuid) -> Result<VendorRecord, VendorsServiceError>;

    /// The vendor profile owned by a user.
    async fn get_profile(&self, user: UserUuid) -> Result<VendorRecord, VendorsServiceError>;

    /// Create the user's vendor profile. A user may only have one.
    async fn create_profile(
        &self,
        user: UserUuid,
        profile: VendorProfile,
    ) -> Result<VendorRecord, VendorsServiceError>;

    async fn update_profile(
        &self,
        user: UserUuid,
        profile: VendorProfile,
    ) -> Result<VendorRecord, VendorsServiceError>;

    async fn update_delivery_settings(
        &self,
        user: UserUuid,
        settings: DeliverySettings,
    ) -> Result<VendorRecord, VendorsServiceError>;

    /// Product, order, revenue, and rating figures for the user's vendor.
    async fn dashboard(&self, user: UserUuid) -> Result<VendorDashboard, VendorsServiceError>;

    async fn set_verified(
        &self,
        vendor: VendorUuid,
        is_verified: bool,
    ) -> Result<VendorRecord, VendorsServiceError>;

    async fn set_status(
        &self,
        vendor: VendorUuid,
        status: VendorStatus,
    ) -> Result<VendorRecord, VendorsServiceError>;

    async fn delete_vendor(&self, vendor: VendorUuid) -> Result<(), VendorsServiceError>;
}
