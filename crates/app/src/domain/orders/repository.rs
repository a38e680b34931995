//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{amount_to_i64, count_to_i32, try_get_amount, try_get_count, try_get_enum},
    domain::{
        orders::records::{
            OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid, PaymentMethod,
            ShippingAddress,
        },
        products::records::ProductUuid,
        users::records::UserUuid,
        vendors::records::VendorUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");
const RESTORE_STOCK_SQL: &str = include_str!("sql/restore_stock.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("sql/list_user_orders.sql");
const LIST_VENDOR_ORDERS_SQL: &str = include_str!("sql/list_vendor_orders.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const GET_VENDOR_OWNER_SQL: &str = include_str!("sql/get_vendor_owner.sql");

/// Header values for a new order. Items are inserted separately.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NewOrder<'a> {
    pub order_number: &'a str,
    pub user_uuid: UserUuid,
    pub vendor_uuid: VendorUuid,
    pub payment_method: PaymentMethod,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub discount: u64,
    pub total: u64,
    pub discount_code: Option<&'a str>,
    pub shipping_address: &'a ShippingAddress,
    pub notes: Option<&'a str>,
}

#[derive(Debug)]
pub(crate) struct NewOrderItem<'a> {
    pub product_uuid: ProductUuid,
    pub title: &'a str,
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an order header. Returns `None` when the order number is taken.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder<'_>,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        let address = order.shipping_address;

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(OrderUuid::new().into_uuid())
            .bind(order.order_number)
            .bind(order.user_uuid.into_uuid())
            .bind(order.vendor_uuid.into_uuid())
            .bind(order.payment_method.as_str())
            .bind(amount_to_i64("subtotal", order.subtotal)?)
            .bind(amount_to_i64("delivery_fee", order.delivery_fee)?)
            .bind(amount_to_i64("discount", order.discount)?)
            .bind(amount_to_i64("total", order.total)?)
            .bind(order.discount_code)
            .bind(&address.name)
            .bind(&address.phone)
            .bind(&address.street)
            .bind(&address.city)
            .bind(&address.state)
            .bind(&address.pincode)
            .bind(order.notes)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: &NewOrderItem<'_>,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(item.title)
            .bind(amount_to_i64("unit_price", item.unit_price)?)
            .bind(count_to_i32("quantity", item.quantity)?)
            .bind(amount_to_i64("line_total", item.line_total)?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Take units out of stock. Returns `false` when not enough are left.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(count_to_i32("quantity", quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }

    /// Put every unit of an order back on the shelf.
    pub(crate) async fn restore_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<(), sqlx::Error> {
        query(RESTORE_STOCK_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let record = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        self.with_items(tx, vec![record])
            .await?
            .pop()
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Lock an order row for a status change. Items are not loaded.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let orders = query_as::<Postgres, OrderRecord>(LIST_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .bind(status.map(OrderStatus::as_str))
            .fetch_all(&mut **tx)
            .await?;

        self.with_items(tx, orders).await
    }

    pub(crate) async fn list_vendor_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let orders = query_as::<Postgres, OrderRecord>(LIST_VENDOR_ORDERS_SQL)
            .bind(owner.into_uuid())
            .bind(status.map(OrderStatus::as_str))
            .fetch_all(&mut **tx)
            .await?;

        self.with_items(tx, orders).await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let orders = query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(status.map(OrderStatus::as_str))
            .fetch_all(&mut **tx)
            .await?;

        self.with_items(tx, orders).await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
        cancellation_reason: Option<&str>,
    ) -> Result<OrderRecord, sqlx::Error> {
        let record = query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(cancellation_reason)
            .fetch_one(&mut **tx)
            .await?;

        self.with_items(tx, vec![record])
            .await?
            .pop()
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub(crate) async fn vendor_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<Option<UserUuid>, sqlx::Error> {
        let owner = query_scalar::<Postgres, Uuid>(GET_VENDOR_OWNER_SQL)
            .bind(vendor.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(owner.map(UserUuid::from_uuid))
    }

    /// Load the line items for a batch of orders in one query.
    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(orders);
        }

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let items = query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_order: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for item in items {
            by_order.entry(item.order_uuid).or_default().push(item);
        }

        for order in &mut orders {
            order.items = by_order.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: row.try_get("order_number")?,
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            vendor_uuid: VendorUuid::from_uuid(row.try_get("vendor_uuid")?),
            status: try_get_enum(row, "status")?,
            payment_method: try_get_enum(row, "payment_method")?,
            subtotal: try_get_amount(row, "subtotal")?,
            delivery_fee: try_get_amount(row, "delivery_fee")?,
            discount: try_get_amount(row, "discount")?,
            total: try_get_amount(row, "total")?,
            discount_code: row.try_get("discount_code")?,
            shipping_address: ShippingAddress {
                name: row.try_get("shipping_name")?,
                phone: row.try_get("shipping_phone")?,
                street: row.try_get("shipping_street")?,
                city: row.try_get("shipping_city")?,
                state: row.try_get("shipping_state")?,
                pincode: row.try_get("shipping_pincode")?,
            },
            notes: row.try_get("notes")?,
            cancellation_reason: row.try_get("cancellation_reason")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            title: row.try_get("title")?,
            unit_price: try_get_amount(row, "unit_price")?,
            quantity: try_get_count(row, "quantity")?,
            line_total: try_get_amount(row, "line_total")?,
        })
    }
}
