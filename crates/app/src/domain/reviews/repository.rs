//! Reviews Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::try_get_enum,
    domain::{
        products::records::ProductUuid,
        reviews::{
            data::NewReview,
            records::{ReviewRecord, ReviewStatus, ReviewUuid},
        },
        users::records::UserUuid,
        vendors::records::VendorUuid,
    },
};

const GET_REVIEWABLE_PRODUCT_SQL: &str = include_str!("sql/get_reviewable_product.sql");
const HAS_DELIVERED_PURCHASE_SQL: &str = include_str!("sql/has_delivered_purchase.sql");
const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const GET_REVIEW_SQL: &str = include_str!("sql/get_review.sql");
const LOCK_REVIEW_SQL: &str = include_str!("sql/lock_review.sql");
const UPDATE_REVIEW_SQL: &str = include_str!("sql/update_review.sql");
const MODERATE_REVIEW_SQL: &str = include_str!("sql/moderate_review.sql");
const DELETE_REVIEW_SQL: &str = include_str!("sql/delete_review.sql");
const LIST_PRODUCT_REVIEWS_SQL: &str = include_str!("sql/list_product_reviews.sql");
const LIST_VENDOR_REVIEWS_SQL: &str = include_str!("sql/list_vendor_reviews.sql");
const LIST_USER_REVIEWS_SQL: &str = include_str!("sql/list_user_reviews.sql");
const LIST_REVIEWS_SQL: &str = include_str!("sql/list_reviews.sql");
const LOCK_PRODUCT_FOR_RATING_SQL: &str = include_str!("sql/lock_product_for_rating.sql");
const REFRESH_PRODUCT_RATING_SQL: &str = include_str!("sql/refresh_product_rating.sql");

/// Ownership facts for a locked review.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReviewOwnership {
    pub product_uuid: ProductUuid,
    pub user_uuid: UserUuid,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReviewsRepository;

impl PgReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Vendor of a product that can still be reviewed.
    pub(crate) async fn reviewable_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<VendorUuid>, sqlx::Error> {
        let vendor = query_scalar::<Postgres, Uuid>(GET_REVIEWABLE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(vendor.map(VendorUuid::from_uuid))
    }

    pub(crate) async fn has_delivered_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(HAS_DELIVERED_PURCHASE_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert a review whose fields have already been validated.
    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: &NewReview,
        vendor: VendorUuid,
        user: UserUuid,
        is_verified_purchase: bool,
    ) -> Result<ReviewUuid, sqlx::Error> {
        let uuid = ReviewUuid::new();

        query(CREATE_REVIEW_SQL)
            .bind(uuid.into_uuid())
            .bind(review.product_uuid.into_uuid())
            .bind(vendor.into_uuid())
            .bind(user.into_uuid())
            .bind(i16::from(review.rating))
            .bind(review.title.as_deref())
            .bind(&review.comment)
            .bind(is_verified_purchase)
            .execute(&mut **tx)
            .await?;

        Ok(uuid)
    }

    pub(crate) async fn get_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(GET_REVIEW_SQL)
            .bind(review.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
    ) -> Result<ReviewOwnership, sqlx::Error> {
        let row = query(LOCK_REVIEW_SQL)
            .bind(review.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(ReviewOwnership {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
        })
    }

    pub(crate) async fn update_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
        rating: u8,
        title: Option<&str>,
        comment: &str,
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_REVIEW_SQL)
            .bind(review.into_uuid())
            .bind(i16::from(rating))
            .bind(title)
            .bind(comment)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn moderate_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
        status: ReviewStatus,
        note: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        query(MODERATE_REVIEW_SQL)
            .bind(review.into_uuid())
            .bind(status.as_str())
            .bind(note)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
    ) -> Result<(), sqlx::Error> {
        query(DELETE_REVIEW_SQL)
            .bind(review.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_product_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(LIST_PRODUCT_REVIEWS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_vendor_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(LIST_VENDOR_REVIEWS_SQL)
            .bind(vendor.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(LIST_USER_REVIEWS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(LIST_REVIEWS_SQL)
            .bind(status.map(ReviewStatus::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    /// Recompute a product's rating from its approved reviews.
    ///
    /// The product row is locked first so the recount runs in a statement
    /// that starts after any concurrent review write has committed.
    pub(crate) async fn refresh_product_rating(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<(), sqlx::Error> {
        query(LOCK_PRODUCT_FOR_RATING_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        query(REFRESH_PRODUCT_RATING_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let rating: i16 = row.try_get("rating")?;

        Ok(Self {
            uuid: ReviewUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            vendor_uuid: VendorUuid::from_uuid(row.try_get("vendor_uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            reviewer_name: row.try_get("reviewer_name")?,
            rating: u8::try_from(rating).map_err(|source| sqlx::Error::ColumnDecode {
                index: "rating".to_string(),
                source: Box::new(source),
            })?,
            title: row.try_get("title")?,
            comment: row.try_get("comment")?,
            status: try_get_enum(row, "status")?,
            is_verified_purchase: row.try_get("is_verified_purchase")?,
            moderation_note: row.try_get("moderation_note")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
