//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::models::Principal,
    database::Db,
    domain::{
        carts::repository::PgCartsRepository,
        catalog::repository::PgCatalogRepository,
        orders::{
            errors::OrdersServiceError,
            models::{Order, OrderItem, OrderUuid},
            repository::PgOrdersRepository,
            status::OrderStatus,
        },
        pricing::{self, PricingError},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    carts: PgCartsRepository,
    catalog: PgCatalogRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            carts: PgCartsRepository::new(),
            catalog: PgCatalogRepository::new(),
        }
    }
}

fn require_admin(principal: Principal) -> Result<(), OrdersServiceError> {
    if principal.is_admin {
        Ok(())
    } else {
        Err(OrdersServiceError::Forbidden)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn checkout(&self, principal: Principal) -> Result<Order, OrdersServiceError> {
        // Administrators cannot place orders.
        if principal.is_admin {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        // The row lock serializes checkout against concurrent cart
        // mutations by the same user.
        let mut cart = self
            .carts
            .lock_cart_by_owner(&mut tx, principal.user)
            .await
            .map_err(OrdersServiceError::Sql)?
            .ok_or(OrdersServiceError::CartNotFound)?;

        cart.items = self
            .carts
            .get_cart_items(&mut tx, cart.uuid)
            .await
            .map_err(OrdersServiceError::Sql)?;

        if cart.items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        // Re-resolve every line at commit time. Cached cart subtotals are
        // not trusted: a price change or archival since the last cart touch
        // must surface here. One bad line fails the whole checkout.
        let mut items = Vec::with_capacity(cart.items.len());
        let mut total: u64 = 0;

        for line in &cart.items {
            let product = match self.catalog.get_product(&mut tx, line.product).await {
                Ok(product) => product,
                Err(sqlx::Error::RowNotFound) => {
                    return Err(OrdersServiceError::InvalidItem(line.product));
                }
                Err(error) => return Err(error.into()),
            };

            let quote = pricing::quote(&product, line.quantity).map_err(|error| match error {
                PricingError::ProductNotFound(uuid) | PricingError::ProductInactive(uuid) => {
                    OrdersServiceError::InvalidItem(uuid)
                }
                PricingError::AmountOverflow => OrdersServiceError::AmountOverflow,
            })?;

            total = total
                .checked_add(quote.subtotal)
                .ok_or(OrdersServiceError::AmountOverflow)?;

            items.push(OrderItem {
                product: line.product,
                quantity: line.quantity,
                subtotal: quote.subtotal,
            });
        }

        let mut order = Order {
            uuid: OrderUuid::new(),
            owner: principal.user,
            items,
            total,
            status: OrderStatus::INITIAL,
            created_at: jiff::Timestamp::now(),
        };

        // Order insert and cart clear share this transaction: either both
        // become durable or neither does, so a crash in between can neither
        // lose the order nor leave the cart ready for a second checkout.
        order.created_at = self.orders.create_order(&mut tx, &order).await?;

        cart.clear_items();

        self.carts
            .store_cart(&mut tx, &cart)
            .await
            .map_err(OrdersServiceError::Sql)?;

        tx.commit().await?;

        info!(order = %order.uuid, owner = %order.owner, total = order.total, "order placed");

        Ok(order)
    }

    async fn track_order(
        &self,
        _principal: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders.get_order(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_my_orders(&self, principal: Principal) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .orders
            .list_orders_for_owner(&mut tx, principal.user)
            .await?;

        tx.commit().await?;

        if orders.is_empty() {
            return Err(OrdersServiceError::NotFound);
        }

        Ok(orders)
    }

    async fn list_all_orders(
        &self,
        principal: Principal,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        require_admin(principal)?;

        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_all_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        principal: Principal,
        order: OrderUuid,
        raw_status: &str,
    ) -> Result<Order, OrdersServiceError> {
        require_admin(principal)?;

        // Membership in the enumeration is the only check here; an
        // administrator may move an order between any two listed statuses.
        let status: OrderStatus = raw_status
            .parse()
            .map_err(|_| OrdersServiceError::InvalidStatus(raw_status.to_string()))?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .orders
            .update_order_status(&mut tx, order, status)
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        let updated = self.orders.get_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(order = %updated.uuid, status = %updated.status, "order status updated");

        Ok(updated)
    }

    async fn mark_received(
        &self,
        principal: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        // Locked so a concurrent admin status change and this transition
        // cannot both proceed from the same stale status.
        let mut current = self.orders.lock_order(&mut tx, order).await?;

        if current.owner != principal.user {
            return Err(OrdersServiceError::Forbidden);
        }

        if !current.status.can_mark_received() {
            return Err(OrdersServiceError::InvalidTransition(current.status));
        }

        self.orders
            .update_order_status(&mut tx, order, OrderStatus::Delivered)
            .await?;

        tx.commit().await?;

        current.status = OrderStatus::Delivered;

        info!(order = %current.uuid, "order marked as received");

        Ok(current)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Convert the caller's cart into an immutable order and empty the
    /// cart, atomically. Every line is re-validated and re-priced at commit
    /// time; any missing or inactive product fails the whole checkout.
    async fn checkout(&self, principal: Principal) -> Result<Order, OrdersServiceError>;

    /// Current status plus summary of a single order.
    async fn track_order(
        &self,
        principal: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// The caller's orders, newest first. `NotFound` when none exist.
    async fn list_my_orders(&self, principal: Principal)
    -> Result<Vec<Order>, OrdersServiceError>;

    /// Every order in the store. Administrator only.
    async fn list_all_orders(
        &self,
        principal: Principal,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// Set an order's status to any enumerated value. Administrator only.
    async fn update_status(
        &self,
        principal: Principal,
        order: OrderUuid,
        raw_status: &str,
    ) -> Result<Order, OrdersServiceError>;

    /// Owner-only transition `for_delivery → delivered`.
    async fn mark_received(
        &self,
        principal: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;
}
