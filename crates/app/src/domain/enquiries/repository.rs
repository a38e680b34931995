//! Enquiries Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::try_get_enum,
    domain::enquiries::{
        data::NewEnquiry,
        records::{EnquiryRecord, EnquiryStatus, EnquiryUuid},
    },
};

const CREATE_ENQUIRY_SQL: &str = include_str!("sql/create_enquiry.sql");
const LIST_ENQUIRIES_SQL: &str = include_str!("sql/list_enquiries.sql");
const UPDATE_ENQUIRY_STATUS_SQL: &str = include_str!("sql/update_enquiry_status.sql");
const DELETE_ENQUIRY_SQL: &str = include_str!("sql/delete_enquiry.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgEnquiriesRepository;

impl PgEnquiriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_enquiry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        enquiry: &NewEnquiry,
    ) -> Result<EnquiryRecord, sqlx::Error> {
        query_as::<Postgres, EnquiryRecord>(CREATE_ENQUIRY_SQL)
            .bind(EnquiryUuid::new().into_uuid())
            .bind(&enquiry.name)
            .bind(&enquiry.email)
            .bind(&enquiry.subject)
            .bind(&enquiry.message)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_enquiries(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<EnquiryStatus>,
    ) -> Result<Vec<EnquiryRecord>, sqlx::Error> {
        query_as::<Postgres, EnquiryRecord>(LIST_ENQUIRIES_SQL)
            .bind(status.map(EnquiryStatus::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        enquiry: EnquiryUuid,
        status: EnquiryStatus,
    ) -> Result<EnquiryRecord, sqlx::Error> {
        query_as::<Postgres, EnquiryRecord>(UPDATE_ENQUIRY_STATUS_SQL)
            .bind(enquiry.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_enquiry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        enquiry: EnquiryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ENQUIRY_SQL)
            .bind(enquiry.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for EnquiryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: EnquiryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            subject: row.try_get("subject")?,
            message: row.try_get("message")?,
            status: try_get_enum(row, "status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
