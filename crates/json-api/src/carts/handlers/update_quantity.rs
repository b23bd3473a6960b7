//! Update Cart Quantity Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{add_item::CartMutationResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Update Cart Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateQuantityRequest {
    pub product: Uuid,
    /// The new line quantity; zero removes the line
    pub quantity: u32,
}

/// Update Cart Quantity Handler
///
/// Sets a cart line to an exact quantity. Zero drops the line entirely.
#[endpoint(
    tags("carts"),
    summary = "Update Cart Quantity",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateQuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let request = json.into_inner();

    let cart = state
        .app
        .carts
        .update_quantity(principal, request.product.into(), request.quantity)
        .await
        .map_err(into_status_error)?;

    let message = if request.quantity == 0 {
        "Item removed from cart."
    } else {
        "Cart item quantity updated."
    };

    Ok(Json(CartMutationResponse {
        message: message.to_string(),
        cart: cart.into(),
    }))
}
