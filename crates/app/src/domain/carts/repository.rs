//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{count_to_i32, try_get_amount, try_get_count},
    domain::{
        carts::records::CartLine, products::records::ProductUuid, users::records::UserUuid,
        vendors::records::VendorUuid,
    },
};

const LIST_CART_LINES_SQL: &str = include_str!("sql/list_cart_lines.sql");
const GET_AVAILABLE_STOCK_SQL: &str = include_str!("sql/get_available_stock.sql");
const GET_CART_QUANTITY_SQL: &str = include_str!("sql/get_cart_quantity.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("sql/upsert_cart_item.sql");
const UPDATE_CART_ITEM_SQL: &str = include_str!("sql/update_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("sql/delete_cart_item.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");

fn to_count(column: &str, value: i32) -> sqlx::Result<u32> {
    u32::try_from(value).map_err(|source| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    })
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Cart lines for purchasable products, oldest first.
    pub(crate) async fn list_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(LIST_CART_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Stock of an active product, or `None` if it can't be bought.
    pub(crate) async fn available_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<u32>, sqlx::Error> {
        query_scalar::<Postgres, i32>(GET_AVAILABLE_STOCK_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?
            .map(|stock| to_count("stock", stock))
            .transpose()
    }

    pub(crate) async fn quantity_in_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Option<u32>, sqlx::Error> {
        query_scalar::<Postgres, i32>(GET_CART_QUANTITY_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?
            .map(|quantity| to_count("quantity", quantity))
            .transpose()
    }

    pub(crate) async fn upsert_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_CART_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .bind(count_to_i32("quantity", quantity)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_CART_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .bind(count_to_i32("quantity", quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            title: row.try_get("title")?,
            image: row.try_get("image")?,
            unit: row.try_get("unit")?,
            mrp: try_get_amount(row, "mrp")?,
            unit_price: try_get_amount(row, "selling_price")?,
            quantity: try_get_count(row, "quantity")?,
            stock: try_get_count(row, "stock")?,
            vendor_uuid: VendorUuid::from_uuid(row.try_get("vendor_uuid")?),
            vendor_name: row.try_get("vendor_name")?,
            vendor_delivery_fee: try_get_amount(row, "vendor_delivery_fee")?,
            vendor_min_order_amount: try_get_amount(row, "vendor_min_order_amount")?,
            added_at: row.try_get::<SqlxTimestamp, _>("added_at")?.to_jiff(),
        })
    }
}
