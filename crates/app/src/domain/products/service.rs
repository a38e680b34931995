//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::{Db, MAX_AMOUNT, MAX_COUNT},
    domain::{
        products::{
            data::{ProductDetails, ProductQuery},
            errors::ProductsServiceError,
            records::{ProductPage, ProductRecord, ProductUuid},
            repository::{PgProductsRepository, SearchParams},
        },
        required,
        users::records::UserUuid,
    },
};

/// Most products returned alongside a product page.
const RELATED_PRODUCTS_LIMIT: i64 = 8;

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }

    async fn search(
        &self,
        query: ProductQuery,
        include_inactive: bool,
    ) -> Result<ProductPage, ProductsServiceError> {
        // Price bounds are clamped to what a `BIGINT` column holds.
        let query = ProductQuery {
            min_price: query.min_price.map(|amount| amount.min(MAX_AMOUNT)),
            max_price: query.max_price.map(|amount| amount.min(MAX_AMOUNT)),
            ..query
        };

        let params = SearchParams {
            pattern: query.q.as_deref().and_then(required).map(|q| escape_like(&q)),
            query: &query,
            include_inactive,
        };

        let mut tx = self.db.begin().await?;

        let total = self.repository.count_products(&mut tx, &params).await?;
        let products = self.repository.list_products(&mut tx, &params).await?;

        tx.commit().await?;

        Ok(ProductPage {
            products,
            page: query.page(),
            limit: query.limit(),
            total,
        })
    }
}

/// Escape `ILIKE` wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(c);
    }

    escaped
}

fn clean_details(details: ProductDetails) -> Result<ProductDetails, ProductsServiceError> {
    let title = required(&details.title).ok_or(ProductsServiceError::MissingRequiredData)?;

    if details.mrp > MAX_AMOUNT || details.stock > MAX_COUNT {
        return Err(ProductsServiceError::InvalidData);
    }

    if details.selling_price > details.mrp {
        return Err(ProductsServiceError::PriceAboveMrp);
    }

    let unit = required(&details.unit).unwrap_or_else(|| "piece".to_string());

    Ok(ProductDetails {
        title,
        description: details.description.trim().to_string(),
        short_description: details.short_description.trim().to_string(),
        unit,
        tags: details
            .tags
            .iter()
            .filter_map(|tag| required(tag))
            .map(|tag| tag.to_lowercase())
            .collect(),
        images: details
            .images
            .iter()
            .filter_map(|image| required(image))
            .collect(),
        ..details
    })
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self, query: ProductQuery) -> Result<ProductPage, ProductsServiceError> {
        self.search(query, false).await
    }

    async fn list_all_products(
        &self,
        query: ProductQuery,
    ) -> Result<ProductPage, ProductsServiceError> {
        self.search(query, true).await
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn related_products(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;
        let related = self
            .repository
            .related_products(&mut tx, &product, RELATED_PRODUCTS_LIMIT)
            .await?;

        tx.commit().await?;

        Ok(related)
    }

    async fn owned_products(
        &self,
        owner: UserUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_owned_products(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(products)
    }

    #[tracing::instrument(name = "products.create", skip(self, details), fields(owner = %owner), err)]
    async fn create_product(
        &self,
        owner: UserUuid,
        details: ProductDetails,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let details = clean_details(details)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, ProductUuid::new(), owner, &details)
            .await?
            .ok_or(ProductsServiceError::NoVendorProfile)?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.update",
        skip(self, details),
        fields(owner = %owner, product_uuid = %product),
        err
    )]
    async fn update_product(
        &self,
        owner: UserUuid,
        product: ProductUuid,
        details: ProductDetails,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let details = clean_details(details)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, owner, &details)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "products.delete",
        skip(self),
        fields(owner = %owner, product_uuid = %product),
        err
    )]
    async fn delete_product(
        &self,
        owner: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .soft_delete_owned_product(&mut tx, product, owner)
            .await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(name = "products.set_active", skip(self), fields(product_uuid = %product), err)]
    async fn set_active(
        &self,
        product: ProductUuid,
        is_active: bool,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .set_active(&mut tx, product, is_active)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(name = "products.remove", skip(self), fields(product_uuid = %product), err)]
    async fn remove_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.soft_delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn get_any_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_any_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Search active products.
    async fn list_products(&self, query: ProductQuery) -> Result<ProductPage, ProductsServiceError>;

    /// Search every product, inactive ones included.
    async fn list_all_products(
        &self,
        query: ProductQuery,
    ) -> Result<ProductPage, ProductsServiceError>;

    /// Retrieve a single active product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve a product whether or not it is active.
    async fn get_any_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Other active products in the same category.
    async fn related_products(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Products belonging to the owner's vendor, inactive ones included.
    async fn owned_products(
        &self,
        owner: UserUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Create a product under the owner's vendor profile.
    async fn create_product(
        &self,
        owner: UserUuid,
        details: ProductDetails,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replace a product's details. Products of other vendors are not found.
    async fn update_product(
        &self,
        owner: UserUuid,
        product: ProductUuid,
        details: ProductDetails,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft delete one of the owner's products.
    async fn delete_product(
        &self,
        owner: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;

    async fn set_active(
        &self,
        product: ProductUuid,
        is_active: bool,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft delete any product.
    async fn remove_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            products::records::{Category, ProductSort},
            users::records::Role,
        },
        test::{
            TestContext,
            helpers::{create_product, create_vendor, product_details, register_user},
        },
    };

    use super::*;

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("atta"), "atta");
    }

    #[test]
    fn unstorable_price_or_stock_is_invalid_data() {
        let price = clean_details(product_details("Ghee 1L", MAX_AMOUNT + 1));
        let stock = clean_details(ProductDetails {
            stock: 3_000_000_000,
            ..product_details("Ghee 1L", 65_000)
        });

        assert!(matches!(price, Err(ProductsServiceError::InvalidData)), "got {price:?}");
        assert!(matches!(stock, Err(ProductsServiceError::InvalidData)), "got {stock:?}");
    }

    #[tokio::test]
    async fn create_product_requires_vendor_profile() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "novend@example.com", Role::Vendor).await?;

        let result = ctx
            .products
            .create_product(user.uuid, product_details("Atta", 4_000))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NoVendorProfile)),
            "expected NoVendorProfile, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_price_above_mrp() -> TestResult {
        let ctx = TestContext::new().await;
        let (owner, _vendor) = create_vendor(&ctx, "mrp@example.com").await?;

        let mut details = product_details("Butter", 6_000);
        details.mrp = 5_000;

        let result = ctx.products.create_product(owner.uuid, details).await;

        assert!(matches!(result, Err(ProductsServiceError::PriceAboveMrp)));

        Ok(())
    }

    #[tokio::test]
    async fn create_product_trims_and_lowercases_tags() -> TestResult {
        let ctx = TestContext::new().await;
        let (owner, vendor) = create_vendor(&ctx, "tags@example.com").await?;

        let mut details = product_details("  Basmati Rice ", 12_000);
        details.tags = vec![" Rice ".to_string(), "".to_string(), "LONG-GRAIN".to_string()];

        let product = ctx.products.create_product(owner.uuid, details).await?;

        assert_eq!(product.title, "Basmati Rice");
        assert_eq!(product.vendor_uuid, vendor.uuid);
        assert_eq!(product.tags, vec!["rice", "long-grain"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_sorts_and_pages() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, vendor) = create_vendor(&ctx, "list@example.com").await?;

        create_product(&ctx, vendor.uuid, "Milk", 3_000, 10).await?;
        create_product(&ctx, vendor.uuid, "Paneer", 9_000, 10).await?;
        create_product(&ctx, vendor.uuid, "Curd", 5_000, 10).await?;

        let cheapest_first = ctx
            .products
            .list_products(ProductQuery {
                sort: ProductSort::PriceAsc,
                limit: Some(2),
                ..ProductQuery::default()
            })
            .await?;

        assert_eq!(cheapest_first.total, 3);
        assert_eq!(cheapest_first.limit, 2);
        assert_eq!(
            cheapest_first
                .products
                .iter()
                .map(|p| p.title.as_str())
                .collect::<Vec<_>>(),
            vec!["Milk", "Curd"]
        );

        let second_page = ctx
            .products
            .list_products(ProductQuery {
                sort: ProductSort::PriceAsc,
                limit: Some(2),
                page: Some(2),
                ..ProductQuery::default()
            })
            .await?;

        assert_eq!(second_page.products.len(), 1);
        assert_eq!(second_page.products[0].title, "Paneer");

        let priced = ctx
            .products
            .list_products(ProductQuery {
                min_price: Some(4_000),
                max_price: Some(6_000),
                ..ProductQuery::default()
            })
            .await?;

        assert_eq!(priced.total, 1);
        assert_eq!(priced.products[0].title, "Curd");

        let searched = ctx
            .products
            .list_products(ProductQuery {
                q: Some("pan".to_string()),
                category: Some(Category::Grocery),
                ..ProductQuery::default()
            })
            .await?;

        assert_eq!(searched.total, 1);
        assert_eq!(searched.products[0].title, "Paneer");

        Ok(())
    }

    #[tokio::test]
    async fn inactive_products_are_hidden_from_public_views() -> TestResult {
        let ctx = TestContext::new().await;
        let (owner, vendor) = create_vendor(&ctx, "hide@example.com").await?;

        let product = create_product(&ctx, vendor.uuid, "Hidden", 1_000, 1).await?;

        ctx.products.set_active(product.uuid, false).await?;

        let public = ctx.products.list_products(ProductQuery::default()).await?;
        let admin = ctx
            .products
            .list_all_products(ProductQuery::default())
            .await?;
        let mine = ctx.products.owned_products(owner.uuid).await?;

        assert_eq!(public.total, 0);
        assert_eq!(admin.total, 1);
        assert_eq!(mine.len(), 1);

        let result = ctx.products.get_product(product.uuid).await;

        assert!(matches!(result, Err(ProductsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn update_product_of_another_vendor_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, vendor) = create_vendor(&ctx, "owner@example.com").await?;
        let (intruder, _) = create_vendor(&ctx, "intruder@example.com").await?;

        let product = create_product(&ctx, vendor.uuid, "Mine", 1_000, 1).await?;

        let result = ctx
            .products
            .update_product(intruder.uuid, product.uuid, product_details("Theirs", 500))
            .await;

        assert!(matches!(result, Err(ProductsServiceError::NotFound)));

        let delete = ctx
            .products
            .delete_product(intruder.uuid, product.uuid)
            .await;

        assert!(matches!(delete, Err(ProductsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_is_soft_and_final() -> TestResult {
        let ctx = TestContext::new().await;
        let (owner, vendor) = create_vendor(&ctx, "soft@example.com").await?;

        let product = create_product(&ctx, vendor.uuid, "Soon gone", 1_000, 1).await?;

        ctx.products.delete_product(owner.uuid, product.uuid).await?;

        assert!(matches!(
            ctx.products.get_any_product(product.uuid).await,
            Err(ProductsServiceError::NotFound)
        ));
        assert!(matches!(
            ctx.products.delete_product(owner.uuid, product.uuid).await,
            Err(ProductsServiceError::NotFound)
        ));
        assert!(ctx.products.owned_products(owner.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn related_products_share_category_and_exclude_self() -> TestResult {
        let ctx = TestContext::new().await;
        let (owner, vendor) = create_vendor(&ctx, "related@example.com").await?;

        let anchor = create_product(&ctx, vendor.uuid, "Anchor", 1_000, 1).await?;
        create_product(&ctx, vendor.uuid, "Sibling", 1_000, 1).await?;

        let mut other = product_details("Headphones", 150_000);
        other.category = Category::Electronics;

        ctx.products.create_product(owner.uuid, other).await?;

        let related = ctx.products.related_products(anchor.uuid).await?;

        assert_eq!(related.len(), 1);
        assert_eq!(related[0].title, "Sibling");

        Ok(())
    }
}
