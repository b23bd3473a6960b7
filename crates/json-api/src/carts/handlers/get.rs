//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::{Cart, CartItem};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The product this line refers to
    pub product: Uuid,

    /// Units of the product in the cart
    pub quantity: u32,

    /// Line subtotal in cents, as priced at the last touch
    pub subtotal: u64,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        CartItemResponse {
            product: item.product.into(),
            quantity: item.quantity,
            subtotal: item.subtotal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The user the cart belongs to
    pub owner: Uuid,

    /// The cart lines
    pub items: Vec<CartItemResponse>,

    /// Sum of the line subtotals in cents
    pub total: u64,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            uuid: cart.uuid.into(),
            owner: cart.owner.into(),
            items: cart.items.into_iter().map(Into::into).collect(),
            total: cart.total,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GetCartResponse {
    pub cart: CartResponse,
}

/// Get Cart Handler
///
/// Returns the caller's cart.
#[endpoint(tags("carts"), summary = "Get Cart", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<GetCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let cart = state
        .app
        .carts
        .view_cart(principal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(GetCartResponse { cart: cart.into() }))
}
