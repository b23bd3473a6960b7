//! Carts service.
//!
//! Each operation runs in one transaction: lock the owner's cart row, load
//! the aggregate, apply the pure mutation, write the result back. The row
//! lock is what keeps two concurrent requests on the same cart from
//! interleaving their read-modify-write of the total.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    auth::models::Principal,
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartUuid},
            repository::PgCartsRepository,
        },
        catalog::{models::ProductUuid, repository::PgCatalogRepository},
        pricing::{self, LineQuote},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts: PgCartsRepository,
    catalog: PgCatalogRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            catalog: PgCatalogRepository::new(),
        }
    }

    /// Resolve the current price of `product` inside the transaction, so the
    /// quote and the cart write see the same catalog state.
    async fn resolve_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<LineQuote, CartsServiceError> {
        let product_row = match self.catalog.get_product(tx, product).await {
            Ok(product_row) => product_row,
            Err(sqlx::Error::RowNotFound) => return Err(CartsServiceError::ProductNotFound),
            Err(error) => return Err(error.into()),
        };

        Ok(pricing::quote(&product_row, quantity)?)
    }

    async fn load_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut cart: Cart,
    ) -> Result<Cart, CartsServiceError> {
        let items = self.carts.get_cart_items(tx, cart.uuid).await?;

        cart.items = items;

        Ok(cart)
    }
}

fn require_customer(principal: Principal) -> Result<(), CartsServiceError> {
    if principal.is_admin {
        Err(CartsServiceError::Forbidden)
    } else {
        Ok(())
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn view_cart(&self, principal: Principal) -> Result<Cart, CartsServiceError> {
        require_customer(principal)?;

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts
            .get_cart_by_owner(&mut tx, principal.user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let cart = self.load_cart(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn add_item(
        &self,
        principal: Principal,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        require_customer(principal)?;

        if quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let quote = self.resolve_line(&mut tx, product, quantity).await?;

        // Created lazily on first add.
        let mut cart = match self.carts.lock_cart_by_owner(&mut tx, principal.user).await? {
            Some(cart) => self.load_cart(&mut tx, cart).await?,
            None => {
                self.carts
                    .create_cart(&mut tx, CartUuid::new(), principal.user)
                    .await?
            }
        };

        cart.upsert_item(product, quantity, quote.unit_price)?;

        self.carts.store_cart(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn update_quantity(
        &self,
        principal: Principal,
        product: ProductUuid,
        new_quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        require_customer(principal)?;

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts
            .lock_cart_by_owner(&mut tx, principal.user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let mut cart = self.load_cart(&mut tx, cart).await?;

        let unit_price = if new_quantity == 0 {
            // The line is being dropped; no price resolution needed.
            0
        } else {
            self.resolve_line(&mut tx, product, new_quantity)
                .await?
                .unit_price
        };

        cart.set_item_quantity(product, new_quantity, unit_price)?;

        self.carts.store_cart(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(
        &self,
        principal: Principal,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError> {
        require_customer(principal)?;

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts
            .lock_cart_by_owner(&mut tx, principal.user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let mut cart = self.load_cart(&mut tx, cart).await?;

        cart.remove_item(product)?;

        self.carts.store_cart(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, principal: Principal) -> Result<Cart, CartsServiceError> {
        require_customer(principal)?;

        let mut tx = self.db.begin().await?;

        let mut cart = self
            .carts
            .lock_cart_by_owner(&mut tx, principal.user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        cart.clear_items();

        self.carts.store_cart(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Read-only projection of the caller's cart.
    async fn view_cart(&self, principal: Principal) -> Result<Cart, CartsServiceError>;

    /// Add `quantity` units of `product`, creating the cart if the caller
    /// has none. The line is repriced from the catalog on every touch.
    async fn add_item(
        &self,
        principal: Principal,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Set a line to exactly `new_quantity` units; zero removes the line.
    async fn update_quantity(
        &self,
        principal: Principal,
        product: ProductUuid,
        new_quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Delete a line from the caller's cart.
    async fn remove_item(
        &self,
        principal: Principal,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError>;

    /// Empty the caller's cart unconditionally.
    async fn clear_cart(&self, principal: Principal) -> Result<Cart, CartsServiceError>;
}
