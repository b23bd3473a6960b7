//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::models::UserUuid,
    domain::{
        carts::models::{Cart, CartItem, CartUuid},
        catalog::{models::ProductUuid, repository::try_get_amount},
    },
};

const LOCK_CART_BY_OWNER_SQL: &str = include_str!("sql/lock_cart_by_owner.sql");
const GET_CART_BY_OWNER_SQL: &str = include_str!("sql/get_cart_by_owner.sql");
const CREATE_CART_SQL: &str = include_str!("sql/create_cart.sql");
const GET_CART_ITEMS_SQL: &str = include_str!("sql/get_cart_items.sql");
const DELETE_CART_ITEMS_SQL: &str = include_str!("sql/delete_cart_items.sql");
const INSERT_CART_ITEM_SQL: &str = include_str!("sql/insert_cart_item.sql");
const SET_CART_TOTAL_SQL: &str = include_str!("sql/set_cart_total.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Fetch the owner's cart and take a row lock on it for the remainder of
    /// the transaction. All mutations go through this, so two requests
    /// racing on the same cart serialize instead of losing updates.
    pub(crate) async fn lock_cart_by_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<Option<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(LOCK_CART_BY_OWNER_SQL)
            .bind(owner.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Lock-free read used by the cart view.
    pub(crate) async fn get_cart_by_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<Option<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(GET_CART_BY_OWNER_SQL)
            .bind(owner.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        owner: UserUuid,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(CREATE_CART_SQL)
            .bind(cart.into_uuid())
            .bind(owner.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Replace the cart's lines wholesale and store the recomputed total.
    /// Delete-then-insert keeps the stored state exactly what the aggregate
    /// computed, with no drift from incremental updates.
    pub(crate) async fn store_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &Cart,
    ) -> Result<(), sqlx::Error> {
        query(DELETE_CART_ITEMS_SQL)
            .bind(cart.uuid.into_uuid())
            .execute(&mut **tx)
            .await?;

        for (position, item) in cart.items.iter().enumerate() {
            query(INSERT_CART_ITEM_SQL)
                .bind(cart.uuid.into_uuid())
                .bind(item.product.into_uuid())
                .bind(i64::from(item.quantity))
                .bind(into_amount_i64(item.subtotal)?)
                .bind(into_position_i32(position)?)
                .execute(&mut **tx)
                .await?;
        }

        query(SET_CART_TOTAL_SQL)
            .bind(cart.uuid.into_uuid())
            .bind(into_amount_i64(cart.total)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

fn into_amount_i64(amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: "subtotal".to_string(),
        source: Box::new(e),
    })
}

fn into_position_i32(position: usize) -> Result<i32, sqlx::Error> {
    i32::try_from(position).map_err(|e| sqlx::Error::ColumnDecode {
        index: "position".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            owner: UserUuid::from_uuid(row.try_get("owner_uuid")?),
            items: Vec::new(),
            total: try_get_amount(row, "total")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
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
