//! Orders Repository

use std::str::FromStr;

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    auth::models::UserUuid,
    domain::{
        catalog::{models::ProductUuid, repository::try_get_amount},
        orders::{
            models::{Order, OrderItem, OrderUuid},
            status::OrderStatus,
        },
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const INSERT_ORDER_ITEM_SQL: &str = include_str!("sql/insert_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const LIST_ORDERS_FOR_OWNER_SQL: &str = include_str!("sql/list_orders_for_owner.sql");
const LIST_ALL_ORDERS_SQL: &str = include_str!("sql/list_all_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the order header and all of its lines. Runs inside the
    /// checkout transaction, so the order and the cart clear commit as one
    /// unit.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &Order,
    ) -> Result<Timestamp, sqlx::Error> {
        let created_at: SqlxTimestamp = query_scalar(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.owner.into_uuid())
            .bind(into_amount_i64(order.total)?)
            .bind(order.status.as_str())
            .fetch_one(&mut **tx)
            .await?;

        for (position, item) in order.items.iter().enumerate() {
            query(INSERT_ORDER_ITEM_SQL)
                .bind(order.uuid.into_uuid())
                .bind(item.product.into_uuid())
                .bind(i64::from(item.quantity))
                .bind(into_amount_i64(item.subtotal)?)
                .bind(into_position_i32(position)?)
                .execute(&mut **tx)
                .await?;
        }

        Ok(created_at.to_jiff())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        let mut order = query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        order.items = self.get_order_items(tx, order.uuid).await?;

        Ok(order)
    }

    /// Like [`Self::get_order`] but takes a row lock, so a status change and
    /// a concurrent mark-received cannot both read the same stale status.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        let mut order = query_as::<Postgres, Order>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        order.items = self.get_order_items(tx, order.uuid).await?;

        Ok(order)
    }

    pub(crate) async fn list_orders_for_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let orders = query_as::<Postgres, Order>(LIST_ORDERS_FOR_OWNER_SQL)
            .bind(owner.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        self.load_items(tx, orders).await
    }

    pub(crate) async fn list_all_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let orders = query_as::<Postgres, Order>(LIST_ALL_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        self.load_items(tx, orders).await
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(GET_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    async fn load_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<Order>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        for order in &mut orders {
            order.items = self.get_order_items(tx, order.uuid).await?;
        }

        Ok(orders)
    }
}

fn into_amount_i64(amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: "total".to_string(),
        source: Box::new(e),
    })
}

fn into_position_i32(position: usize) -> Result<i32, sqlx::Error> {
    i32::try_from(position).map_err(|e| sqlx::Error::ColumnDecode {
        index: "position".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = OrderStatus::from_str(&status).map_err(|e| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            owner: UserUuid::from_uuid(row.try_get("owner_uuid")?),
            items: Vec::new(),
            total: try_get_amount(row, "total")?,
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i64: i64 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity,
            subtotal: try_get_amount(row, "subtotal")?,
        })
    }
}
