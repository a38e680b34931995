//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            pricing::{CartSummary, DiscountCode, price_cart},
            repository::PgCartsRepository,
        },
        products::records::ProductUuid,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartsRepository::new(),
        }
    }

    async fn summarise(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        code: Option<DiscountCode>,
    ) -> Result<CartSummary, CartsServiceError> {
        let lines = self.repository.list_lines(tx, user).await?;

        Ok(price_cart(lines, code))
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(
        &self,
        user: UserUuid,
        discount_code: Option<String>,
    ) -> Result<CartSummary, CartsServiceError> {
        let code = DiscountCode::parse_optional(discount_code.as_deref())?;

        let mut tx = self.db.begin().await?;

        let summary = self.summarise(&mut tx, user, code).await?;

        tx.commit().await?;

        Ok(summary)
    }

    #[tracing::instrument(
        name = "carts.add_item",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product),
        err
    )]
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartSummary, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let stock = self
            .repository
            .available_stock(&mut tx, product)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        let existing = self
            .repository
            .quantity_in_cart(&mut tx, user, product)
            .await?
            .unwrap_or(0);

        let wanted = existing.saturating_add(quantity);

        if wanted > stock {
            return Err(CartsServiceError::InsufficientStock);
        }

        self.repository
            .upsert_item(&mut tx, user, product, wanted)
            .await?;

        let summary = self.summarise(&mut tx, user, None).await?;

        tx.commit().await?;

        Ok(summary)
    }

    #[tracing::instrument(
        name = "carts.update_item",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product),
        err
    )]
    async fn update_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        if quantity == 0 {
            let rows_affected = self.repository.delete_item(&mut tx, user, product).await?;

            if rows_affected == 0 {
                return Err(CartsServiceError::NotFound);
            }
        } else {
            let stock = self
                .repository
                .available_stock(&mut tx, product)
                .await?
                .ok_or(CartsServiceError::ProductNotFound)?;

            if quantity > stock {
                return Err(CartsServiceError::InsufficientStock);
            }

            let rows_affected = self
                .repository
                .update_item(&mut tx, user, product, quantity)
                .await?;

            if rows_affected == 0 {
                return Err(CartsServiceError::NotFound);
            }
        }

        let summary = self.summarise(&mut tx, user, None).await?;

        tx.commit().await?;

        Ok(summary)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_item(&mut tx, user, product).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let summary = self.summarise(&mut tx, user, None).await?;

        tx.commit().await?;

        Ok(summary)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.clear(&mut tx, user).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's cart, grouped by vendor and priced with an optional discount code.
    async fn get_cart(
        &self,
        user: UserUuid,
        discount_code: Option<String>,
    ) -> Result<CartSummary, CartsServiceError>;

    /// Add units of a product, merging with any existing line.
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartSummary, CartsServiceError>;

    /// Set a line's quantity. Zero removes the line.
    async fn update_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartSummary, CartsServiceError>;

    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartSummary, CartsServiceError>;

    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{products::ProductsService, users::records::Role},
        test::{
            TestContext,
            helpers::{create_product, create_vendor, register_user},
        },
    };

    use super::*;

    #[tokio::test]
    async fn add_item_merges_quantities_and_prices_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = register_user(&ctx, "cart@example.com", Role::User).await?;
        let (_, vendor) = create_vendor(&ctx, "shop@example.com").await?;
        let product = create_product(&ctx, vendor.uuid, "Bread", 4_000, 10).await?;

        ctx.carts.add_item(shopper.uuid, product.uuid, 1).await?;
        let summary = ctx.carts.add_item(shopper.uuid, product.uuid, 2).await?;

        assert_eq!(summary.groups.len(), 1);
        assert_eq!(summary.groups[0].lines[0].line.quantity, 3);
        assert_eq!(summary.subtotal, 12_000);
        assert_eq!(summary.delivery_total, 5_000);
        assert_eq!(summary.total, 17_000);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_beyond_stock_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = register_user(&ctx, "greedy@example.com", Role::User).await?;
        let (_, vendor) = create_vendor(&ctx, "scarce@example.com").await?;
        let product = create_product(&ctx, vendor.uuid, "Saffron", 50_000, 2).await?;

        ctx.carts.add_item(shopper.uuid, product.uuid, 2).await?;

        let result = ctx.carts.add_item(shopper.uuid, product.uuid, 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::InsufficientStock)),
            "expected InsufficientStock, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_zero_quantity_or_unknown_product() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = register_user(&ctx, "zero@example.com", Role::User).await?;

        let zero = ctx.carts.add_item(shopper.uuid, ProductUuid::new(), 0).await;
        let unknown = ctx.carts.add_item(shopper.uuid, ProductUuid::new(), 1).await;

        assert!(matches!(zero, Err(CartsServiceError::InvalidQuantity)));
        assert!(matches!(unknown, Err(CartsServiceError::ProductNotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn update_to_zero_removes_line_and_missing_line_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = register_user(&ctx, "upd@example.com", Role::User).await?;
        let (_, vendor) = create_vendor(&ctx, "upd-shop@example.com").await?;
        let product = create_product(&ctx, vendor.uuid, "Eggs", 700, 30).await?;

        ctx.carts.add_item(shopper.uuid, product.uuid, 6).await?;

        let bumped = ctx.carts.update_item(shopper.uuid, product.uuid, 12).await?;

        assert_eq!(bumped.item_count, 12);

        let emptied = ctx.carts.update_item(shopper.uuid, product.uuid, 0).await?;

        assert!(emptied.is_empty());

        let missing = ctx.carts.update_item(shopper.uuid, product.uuid, 2).await;
        let removed = ctx.carts.remove_item(shopper.uuid, product.uuid).await;

        assert!(matches!(missing, Err(CartsServiceError::NotFound)));
        assert!(matches!(removed, Err(CartsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_applies_discount_and_rejects_unknown_code() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = register_user(&ctx, "disc@example.com", Role::User).await?;
        let (_, first) = create_vendor(&ctx, "first@example.com").await?;
        let (_, second) = create_vendor(&ctx, "second@example.com").await?;

        let a = create_product(&ctx, first.uuid, "Tea", 10_000, 5).await?;
        let b = create_product(&ctx, second.uuid, "Coffee", 20_000, 5).await?;

        ctx.carts.add_item(shopper.uuid, a.uuid, 1).await?;
        ctx.carts.add_item(shopper.uuid, b.uuid, 1).await?;

        let saved = ctx
            .carts
            .get_cart(shopper.uuid, Some("save20".to_string()))
            .await?;

        assert_eq!(saved.groups.len(), 2);
        assert_eq!(saved.groups[0].vendor_uuid, first.uuid);
        assert_eq!(saved.subtotal, 30_000);
        assert_eq!(saved.discount, 6_000);
        assert_eq!(saved.total, 30_000 + 10_000 - 6_000);

        let free = ctx
            .carts
            .get_cart(shopper.uuid, Some("FREEDEL".to_string()))
            .await?;

        assert_eq!(free.delivery_total, 0);

        let bogus = ctx
            .carts
            .get_cart(shopper.uuid, Some("BOGUS".to_string()))
            .await;

        assert!(matches!(
            bogus,
            Err(CartsServiceError::InvalidDiscountCode(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn deactivated_products_drop_out_of_the_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = register_user(&ctx, "gone@example.com", Role::User).await?;
        let (_, vendor) = create_vendor(&ctx, "gone-shop@example.com").await?;
        let product = create_product(&ctx, vendor.uuid, "Seasonal", 1_000, 5).await?;

        ctx.carts.add_item(shopper.uuid, product.uuid, 1).await?;
        ctx.products.set_active(product.uuid, false).await?;

        let summary = ctx.carts.get_cart(shopper.uuid, None).await?;

        assert!(summary.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn clear_cart_empties_everything() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = register_user(&ctx, "clear@example.com", Role::User).await?;
        let (_, vendor) = create_vendor(&ctx, "clear-shop@example.com").await?;
        let product = create_product(&ctx, vendor.uuid, "Jam", 2_000, 5).await?;

        ctx.carts.add_item(shopper.uuid, product.uuid, 2).await?;
        ctx.carts.clear_cart(shopper.uuid).await?;

        assert!(ctx.carts.get_cart(shopper.uuid, None).await?.is_empty());

        Ok(())
    }
}
