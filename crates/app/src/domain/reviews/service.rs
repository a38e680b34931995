//! Reviews service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Principal,
    database::Db,
    domain::{
        optional,
        products::records::ProductUuid,
        required,
        reviews::{
            data::{Moderation, NewReview, ReviewUpdate},
            errors::ReviewsServiceError,
            records::{MAX_RATING, MIN_RATING, ReviewRecord, ReviewStatus, ReviewUuid},
            repository::PgReviewsRepository,
        },
        users::records::UserUuid,
        vendors::records::VendorUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    repository: PgReviewsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReviewsRepository::new(),
        }
    }
}

/// Validate a rating and trim the free-text fields.
fn clean_content(
    rating: u8,
    title: Option<String>,
    comment: &str,
) -> Result<(Option<String>, String), ReviewsServiceError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ReviewsServiceError::InvalidRating);
    }

    let comment = required(comment).ok_or(ReviewsServiceError::MissingRequiredData)?;

    Ok((optional(title), comment))
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    #[tracing::instrument(
        name = "reviews.create_review",
        skip(self, review),
        fields(user_uuid = %user, product_uuid = %review.product_uuid),
        err
    )]
    async fn create_review(
        &self,
        user: UserUuid,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        let (title, comment) = clean_content(review.rating, review.title, &review.comment)?;
        let review = NewReview {
            title,
            comment,
            ..review
        };

        let mut tx = self.db.begin().await?;

        let vendor = self
            .repository
            .reviewable_product(&mut tx, review.product_uuid)
            .await?
            .ok_or(ReviewsServiceError::ProductNotFound)?;

        let verified = self
            .repository
            .has_delivered_purchase(&mut tx, user, review.product_uuid)
            .await?;

        let uuid = self
            .repository
            .create_review(&mut tx, &review, vendor, user, verified)
            .await?;

        self.repository
            .refresh_product_rating(&mut tx, review.product_uuid)
            .await?;

        let record = self.repository.get_review(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn get_review(&self, review: ReviewUuid) -> Result<ReviewRecord, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_review(&mut tx, review).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "reviews.update_review",
        skip(self, update),
        fields(user_uuid = %user, review_uuid = %review),
        err
    )]
    async fn update_review(
        &self,
        user: UserUuid,
        review: ReviewUuid,
        update: ReviewUpdate,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        let (title, comment) = clean_content(update.rating, update.title, &update.comment)?;

        let mut tx = self.db.begin().await?;

        let ownership = self.repository.lock_review(&mut tx, review).await?;

        if ownership.user_uuid != user {
            return Err(ReviewsServiceError::Forbidden);
        }

        self.repository
            .update_review(&mut tx, review, update.rating, title.as_deref(), &comment)
            .await?;

        self.repository
            .refresh_product_rating(&mut tx, ownership.product_uuid)
            .await?;

        let record = self.repository.get_review(&mut tx, review).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "reviews.delete_review",
        skip(self),
        fields(user_uuid = %principal.user_uuid, review_uuid = %review),
        err
    )]
    async fn delete_review(
        &self,
        principal: Principal,
        review: ReviewUuid,
    ) -> Result<(), ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let ownership = self.repository.lock_review(&mut tx, review).await?;

        if ownership.user_uuid != principal.user_uuid && !principal.is_admin() {
            return Err(ReviewsServiceError::Forbidden);
        }

        self.repository.delete_review(&mut tx, review).await?;

        self.repository
            .refresh_product_rating(&mut tx, ownership.product_uuid)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn product_reviews(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self
            .repository
            .list_product_reviews(&mut tx, product)
            .await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn vendor_reviews(
        &self,
        vendor: VendorUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self.repository.list_vendor_reviews(&mut tx, vendor).await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn my_reviews(&self, user: UserUuid) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self.repository.list_user_reviews(&mut tx, user).await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn list_reviews(
        &self,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self.repository.list_reviews(&mut tx, status).await?;

        tx.commit().await?;

        Ok(reviews)
    }

    #[tracing::instrument(
        name = "reviews.moderate_review",
        skip(self, moderation),
        fields(review_uuid = %review, status = %moderation.status),
        err
    )]
    async fn moderate_review(
        &self,
        review: ReviewUuid,
        moderation: Moderation,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        let note = optional(moderation.note);

        let mut tx = self.db.begin().await?;

        let ownership = self.repository.lock_review(&mut tx, review).await?;

        self.repository
            .moderate_review(&mut tx, review, moderation.status, note.as_deref())
            .await?;

        self.repository
            .refresh_product_rating(&mut tx, ownership.product_uuid)
            .await?;

        let record = self.repository.get_review(&mut tx, review).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Post a review. One review per user and product.
    async fn create_review(
        &self,
        user: UserUuid,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    async fn get_review(&self, review: ReviewUuid) -> Result<ReviewRecord, ReviewsServiceError>;

    async fn update_review(
        &self,
        user: UserUuid,
        review: ReviewUuid,
        update: ReviewUpdate,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    /// Remove a review. Allowed for its author and for admins.
    async fn delete_review(
        &self,
        principal: Principal,
        review: ReviewUuid,
    ) -> Result<(), ReviewsServiceError>;

    /// Approved reviews of a product, newest first.
    async fn product_reviews(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;

    /// Approved reviews across a vendor's catalogue, newest first.
    async fn vendor_reviews(
        &self,
        vendor: VendorUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;

    async fn my_reviews(&self, user: UserUuid) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;

    async fn list_reviews(
        &self,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;

    async fn moderate_review(
        &self,
        review: ReviewUuid,
        moderation: Moderation,
    ) -> Result<ReviewRecord, ReviewsServiceError>;
}
