//! Track Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::{Order, OrderItem};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// The product this line refers to
    pub product: Uuid,

    /// Units of the product ordered
    pub quantity: u32,

    /// Line subtotal in cents, frozen at checkout
    pub subtotal: u64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            product: item.product.into(),
            quantity: item.quantity,
            subtotal: item.subtotal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// The user who placed the order
    pub owner: Uuid,

    /// The order lines, frozen at checkout
    pub items: Vec<OrderItemResponse>,

    /// Order total in cents, frozen at checkout
    pub total: u64,

    /// Current fulfillment status
    pub status: String,

    /// The date and time the order was placed
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            owner: order.owner.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            total: order.total,
            status: order.status.to_string(),
            created_at: order.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TrackOrderResponse {
    pub message: String,
    pub order: OrderResponse,
}

/// Track Order Handler
///
/// Reports the current status of an order to any authenticated caller.
#[endpoint(tags("orders"), summary = "Track Order", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TrackOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let order = state
        .app
        .orders
        .track_order(principal, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(TrackOrderResponse {
        message: format!("Order is currently {}", order.status),
        order: order.into(),
    }))
}
