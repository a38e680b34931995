//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::{PgArguments, PgRow},
    query,
    query::QueryAs,
    query_as,
};

use crate::{
    database::{amount_to_i64, count_to_i32, try_get_amount, try_get_count, try_get_enum},
    domain::{
        products::{
            data::{ProductDetails, ProductQuery},
            records::{Category, ProductRecord, ProductUuid},
        },
        users::records::UserUuid,
        vendors::records::VendorUuid,
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_ANY_PRODUCT_SQL: &str = include_str!("sql/get_any_product.sql");
const RELATED_PRODUCTS_SQL: &str = include_str!("sql/related_products.sql");
const LIST_OWNED_PRODUCTS_SQL: &str = include_str!("sql/list_owned_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const SOFT_DELETE_OWNED_PRODUCT_SQL: &str = include_str!("sql/soft_delete_owned_product.sql");
const SOFT_DELETE_PRODUCT_SQL: &str = include_str!("sql/soft_delete_product.sql");
const SET_PRODUCT_ACTIVE_SQL: &str = include_str!("sql/set_product_active.sql");

/// Search filters after validation, in bind order.
#[derive(Debug)]
pub(crate) struct SearchParams<'a> {
    pub query: &'a ProductQuery,
    pub pattern: Option<String>,
    pub include_inactive: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    fn bind_filters<'q, O>(
        statement: QueryAs<'q, Postgres, O, PgArguments>,
        params: &SearchParams<'_>,
    ) -> sqlx::Result<QueryAs<'q, Postgres, O, PgArguments>> {
        let min_price = params
            .query
            .min_price
            .map(|amount| amount_to_i64("min_price", amount))
            .transpose()?;
        let max_price = params
            .query
            .max_price
            .map(|amount| amount_to_i64("max_price", amount))
            .transpose()?;

        Ok(statement
            .bind(params.query.category.map(Category::as_str))
            .bind(params.query.vendor.map(VendorUuid::into_uuid))
            .bind(params.pattern.clone())
            .bind(params.query.featured)
            .bind(min_price)
            .bind(max_price)
            .bind(params.include_inactive))
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        params: &SearchParams<'_>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let offset = i64::try_from(params.query.offset()).map_err(|source| {
            sqlx::Error::ColumnDecode {
                index: "offset".to_string(),
                source: Box::new(source),
            }
        })?;

        Self::bind_filters(query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL), params)?
            .bind(params.query.sort.as_str())
            .bind(i64::from(params.query.limit()))
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        params: &SearchParams<'_>,
    ) -> Result<u64, sqlx::Error> {
        let (total,) = Self::bind_filters(query_as::<Postgres, (i64,)>(COUNT_PRODUCTS_SQL), params)?
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(total).map_err(|source| sqlx::Error::ColumnDecode {
            index: "total".to_string(),
            source: Box::new(source),
        })
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Like `get_product`, but inactive products are returned too.
    pub(crate) async fn get_any_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_ANY_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn related_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &ProductRecord,
        limit: i64,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(RELATED_PRODUCTS_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.category.as_str())
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_owned_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_OWNED_PRODUCTS_SQL)
            .bind(owner.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert a product under the owner's vendor. `None` when the owner has no vendor.
    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        owner: UserUuid,
        details: &ProductDetails,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(owner.into_uuid())
            .bind(&details.title)
            .bind(&details.description)
            .bind(&details.short_description)
            .bind(details.category.as_str())
            .bind(amount_to_i64("mrp", details.mrp)?)
            .bind(amount_to_i64("selling_price", details.selling_price)?)
            .bind(count_to_i32("stock", details.stock)?)
            .bind(&details.unit)
            .bind(&details.tags)
            .bind(&details.images)
            .bind(details.is_featured)
            .bind(details.is_active)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        owner: UserUuid,
        details: &ProductDetails,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(owner.into_uuid())
            .bind(&details.title)
            .bind(&details.description)
            .bind(&details.short_description)
            .bind(details.category.as_str())
            .bind(amount_to_i64("mrp", details.mrp)?)
            .bind(amount_to_i64("selling_price", details.selling_price)?)
            .bind(count_to_i32("stock", details.stock)?)
            .bind(&details.unit)
            .bind(&details.tags)
            .bind(&details.images)
            .bind(details.is_featured)
            .bind(details.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn soft_delete_owned_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        owner: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SOFT_DELETE_OWNED_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(owner.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn soft_delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SOFT_DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn set_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        is_active: bool,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SET_PRODUCT_ACTIVE_SQL)
            .bind(product.into_uuid())
            .bind(is_active)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            vendor_uuid: VendorUuid::from_uuid(row.try_get("vendor_uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            short_description: row.try_get("short_description")?,
            category: try_get_enum(row, "category")?,
            mrp: try_get_amount(row, "mrp")?,
            selling_price: try_get_amount(row, "selling_price")?,
            stock: try_get_count(row, "stock")?,
            unit: row.try_get("unit")?,
            tags: row.try_get("tags")?,
            images: row.try_get("images")?,
            is_featured: row.try_get("is_featured")?,
            is_active: row.try_get("is_active")?,
            rating_average: row.try_get("rating_average")?,
            rating_count: try_get_count(row, "rating_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
