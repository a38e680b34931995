//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    auth::Principal,
    database::Db,
    domain::{
        carts::{
            pricing::{DiscountCode, price_cart},
            repository::PgCartsRepository,
        },
        optional,
        orders::{
            data::Checkout,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderStatus, OrderUuid, ShippingAddress, order_number},
            repository::{NewOrder, NewOrderItem, PgOrdersRepository},
        },
        required,
        users::records::UserUuid,
    },
};

/// Order numbers drawn before checkout gives up on finding a free one.
const ORDER_NUMBER_ATTEMPTS: usize = 5;

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    carts: PgCartsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            carts: PgCartsRepository::new(),
        }
    }

    /// Insert an order header under a fresh order number, drawing again
    /// when a number is already taken.
    async fn create_numbered_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        placed_at: Timestamp,
        order: NewOrder<'_>,
    ) -> Result<OrderRecord, OrdersServiceError> {
        for _ in 0..ORDER_NUMBER_ATTEMPTS {
            let number = order_number(placed_at);
            let order = NewOrder {
                order_number: &number,
                ..order
            };

            if let Some(created) = self.repository.create_order(tx, &order).await? {
                return Ok(created);
            }

            tracing::warn!(order_number = %number, "order number taken, drawing another");
        }

        Err(OrdersServiceError::AlreadyExists)
    }

    /// Move a locked order to `next`, putting stock back on cancellation.
    async fn transition(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        current: &OrderRecord,
        next: OrderStatus,
        reason: Option<&str>,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if !current.status.can_transition_to(next) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.status,
                to: next,
            });
        }

        if next == OrderStatus::Cancelled {
            self.repository.restore_stock(tx, current.uuid).await?;
        }

        let reason = reason.filter(|_| next == OrderStatus::Cancelled);

        Ok(self
            .repository
            .update_status(tx, current.uuid, next, reason)
            .await?)
    }
}

fn clean_address(address: ShippingAddress) -> Result<ShippingAddress, OrdersServiceError> {
    let field = |value: &str| required(value).ok_or(OrdersServiceError::MissingRequiredData);

    Ok(ShippingAddress {
        name: field(&address.name)?,
        phone: field(&address.phone)?,
        street: field(&address.street)?,
        city: field(&address.city)?,
        state: field(&address.state)?,
        pincode: field(&address.pincode)?,
    })
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.checkout",
        skip(self, checkout),
        fields(user_uuid = %user),
        err
    )]
    async fn checkout(
        &self,
        user: UserUuid,
        checkout: Checkout,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let code = DiscountCode::parse_optional(checkout.discount_code.as_deref())?;
        let address = clean_address(checkout.shipping_address)?;
        let notes = optional(checkout.notes);

        let mut tx = self.db.begin().await?;

        let lines = self.carts.list_lines(&mut tx, user).await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let summary = price_cart(lines, code);

        for group in &summary.groups {
            if !group.meets_minimum() {
                return Err(OrdersServiceError::BelowMinimumOrder {
                    vendor: group.vendor_name.clone(),
                    minimum: group.min_order_amount,
                });
            }

            if let Some(short) = group.lines.iter().find(|p| p.line.quantity > p.line.stock) {
                return Err(OrdersServiceError::InsufficientStock(
                    short.line.title.clone(),
                ));
            }
        }

        let placed_at = Timestamp::now();
        let mut orders = Vec::with_capacity(summary.groups.len());

        for group in &summary.groups {
            let mut order = self
                .create_numbered_order(
                    &mut tx,
                    placed_at,
                    NewOrder {
                        order_number: "",
                        user_uuid: user,
                        vendor_uuid: group.vendor_uuid,
                        payment_method: checkout.payment_method,
                        subtotal: group.subtotal,
                        delivery_fee: group.delivery_fee,
                        discount: group.discount,
                        total: group.total,
                        discount_code: code.map(DiscountCode::as_str),
                        shipping_address: &address,
                        notes: notes.as_deref(),
                    },
                )
                .await?;

            for priced in &group.lines {
                let line = &priced.line;

                if !self
                    .repository
                    .decrement_stock(&mut tx, line.product_uuid, line.quantity)
                    .await?
                {
                    return Err(OrdersServiceError::InsufficientStock(line.title.clone()));
                }

                let item = self
                    .repository
                    .create_order_item(
                        &mut tx,
                        order.uuid,
                        &NewOrderItem {
                            product_uuid: line.product_uuid,
                            title: &line.title,
                            unit_price: line.unit_price,
                            quantity: line.quantity,
                            line_total: priced.line_total,
                        },
                    )
                    .await?;

                order.items.push(item);
            }

            orders.push(order);
        }

        self.carts.clear(&mut tx, user).await?;

        tx.commit().await?;

        tracing::info!(orders = orders.len(), total = summary.total, "checkout complete");

        Ok(orders)
    }

    async fn my_orders(
        &self,
        user: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .repository
            .list_user_orders(&mut tx, user, status)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        principal: Principal,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_order(&mut tx, order).await?;

        let allowed = principal.is_admin()
            || record.user_uuid == principal.user_uuid
            || self
                .repository
                .vendor_owner(&mut tx, record.vendor_uuid)
                .await?
                == Some(principal.user_uuid);

        tx.commit().await?;

        if !allowed {
            return Err(OrdersServiceError::Forbidden);
        }

        Ok(record)
    }

    #[tracing::instrument(
        name = "orders.cancel_order",
        skip(self, reason),
        fields(user_uuid = %user, order_uuid = %order),
        err
    )]
    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        reason: Option<String>,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let reason = optional(reason);

        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        if current.user_uuid != user {
            return Err(OrdersServiceError::Forbidden);
        }

        let record = self
            .transition(&mut tx, &current, OrderStatus::Cancelled, reason.as_deref())
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn vendor_orders(
        &self,
        owner: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .repository
            .list_vendor_orders(&mut tx, owner, status)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.vendor_update_status",
        skip(self),
        fields(owner_uuid = %owner, order_uuid = %order, status = %status),
        err
    )]
    async fn vendor_update_status(
        &self,
        owner: UserUuid,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        let vendor_owner = self
            .repository
            .vendor_owner(&mut tx, current.vendor_uuid)
            .await?;

        if vendor_owner != Some(owner) {
            return Err(OrdersServiceError::Forbidden);
        }

        let record = self.transition(&mut tx, &current, status, None).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, status).await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.admin_update_status",
        skip(self),
        fields(order_uuid = %order, status = %status),
        err
    )]
    async fn admin_update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        let record = self.transition(&mut tx, &current, status, None).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the user's cart into one order per vendor and empty the cart.
    async fn checkout(
        &self,
        user: UserUuid,
        checkout: Checkout,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    async fn my_orders(
        &self,
        user: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Fetch an order visible to the buyer, the selling vendor, or an admin.
    async fn get_order(
        &self,
        principal: Principal,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Buyer cancellation. Only pending or confirmed orders can be cancelled.
    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        reason: Option<String>,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Orders placed with the vendor owned by `owner`.
    async fn vendor_orders(
        &self,
        owner: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    async fn vendor_update_status(
        &self,
        owner: UserUuid,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    async fn admin_update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
