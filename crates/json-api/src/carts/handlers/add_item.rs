//! Add To Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, get::CartResponse},
    extensions::*,
    state::State,
};

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToCartRequest {
    pub product: Uuid,
    pub quantity: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartMutationResponse {
    pub message: String,
    pub cart: CartResponse,
}

/// Add To Cart Handler
///
/// Adds units of a product to the caller's cart, creating the cart on first
/// use. The line is priced from the catalog at request time.
#[endpoint(
    tags("carts"),
    summary = "Add To Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product added to cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid product or quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found or inactive"),
        (status_code = StatusCode::FORBIDDEN, description = "Admins cannot modify carts"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let request = json.into_inner();

    let cart = state
        .app
        .carts
        .add_item(principal, request.product.into(), request.quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartMutationResponse {
        message: "Product added to cart".to_string(),
        cart: cart.into(),
    }))
}
