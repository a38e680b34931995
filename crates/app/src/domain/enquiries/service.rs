//! Enquiries service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        enquiries::{
            data::NewEnquiry,
            errors::EnquiriesServiceError,
            records::{EnquiryRecord, EnquiryStatus, EnquiryUuid},
            repository::PgEnquiriesRepository,
        },
        required,
    },
};

#[derive(Debug, Clone)]
pub struct PgEnquiriesService {
    db: Db,
    repository: PgEnquiriesRepository,
}

impl PgEnquiriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgEnquiriesRepository::new(),
        }
    }
}

fn clean_enquiry(enquiry: &NewEnquiry) -> Result<NewEnquiry, EnquiriesServiceError> {
    let field = |value: &str| required(value).ok_or(EnquiriesServiceError::MissingRequiredData);

    Ok(NewEnquiry {
        name: field(&enquiry.name)?,
        email: field(&enquiry.email)?.to_lowercase(),
        subject: field(&enquiry.subject)?,
        message: field(&enquiry.message)?,
    })
}

#[async_trait]
impl EnquiriesService for PgEnquiriesService {
    #[tracing::instrument(name = "enquiries.create_enquiry", skip_all, err)]
    async fn create_enquiry(
        &self,
        enquiry: NewEnquiry,
    ) -> Result<EnquiryRecord, EnquiriesServiceError> {
        let enquiry = clean_enquiry(&enquiry)?;

        let mut tx = self.db.begin().await?;

        let record = self.repository.create_enquiry(&mut tx, &enquiry).await?;

        tx.commit().await?;

        tracing::info!(enquiry_uuid = %record.uuid, "enquiry received");

        Ok(record)
    }

    async fn list_enquiries(
        &self,
        status: Option<EnquiryStatus>,
    ) -> Result<Vec<EnquiryRecord>, EnquiriesServiceError> {
        let mut tx = self.db.begin().await?;

        let enquiries = self.repository.list_enquiries(&mut tx, status).await?;

        tx.commit().await?;

        Ok(enquiries)
    }

    async fn update_status(
        &self,
        enquiry: EnquiryUuid,
        status: EnquiryStatus,
    ) -> Result<EnquiryRecord, EnquiriesServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .update_status(&mut tx, enquiry, status)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn delete_enquiry(&self, enquiry: EnquiryUuid) -> Result<(), EnquiriesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_enquiry(&mut tx, enquiry).await?;

        if rows_affected == 0 {
            return Err(EnquiriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait EnquiriesService: Send + Sync {
    /// Record a contact form submission. Every field is required.
    async fn create_enquiry(
        &self,
        enquiry: NewEnquiry,
    ) -> Result<EnquiryRecord, EnquiriesServiceError>;

    /// Enquiries, newest first.
    async fn list_enquiries(
        &self,
        status: Option<EnquiryStatus>,
    ) -> Result<Vec<EnquiryRecord>, EnquiriesServiceError>;

    async fn update_status(
        &self,
        enquiry: EnquiryUuid,
        status: EnquiryStatus,
    ) -> Result<EnquiryRecord, EnquiriesServiceError>;

    async fn delete_enquiry(&self, enquiry: EnquiryUuid) -> Result<(), EnquiriesServiceError>;
}
