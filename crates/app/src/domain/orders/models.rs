//! Order Models

use jiff::Timestamp;

use crate::{
    auth::models::UserUuid,
    domain::{catalog::models::ProductUuid, orders::status::OrderStatus},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// A frozen line within an order. The subtotal is the price snapshot taken
/// at checkout and does not follow later catalog changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub product: ProductUuid,
    pub quantity: u32,
    pub subtotal: u64,
}

/// Order Model
///
/// Everything except `status` is immutable once the order exists.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub owner: UserUuid,
    pub items: Vec<OrderItem>,
    pub total: u64,
    pub status: OrderStatus,
    pub created_at: Timestamp,
}
