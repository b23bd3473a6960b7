//! Checkout Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, track::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    pub message: String,
    pub order: OrderResponse,
}

/// Checkout Handler
///
/// Converts the caller's cart into an order and empties the cart. Every line
/// is re-priced at this moment; a product that vanished or was archived since
/// it was added fails the whole checkout.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or invalid line"),
        (status_code = StatusCode::FORBIDDEN, description = "Admins are not allowed to checkout"),
        (status_code = StatusCode::NOT_FOUND, description = "No cart for the current user"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let order = state
        .app
        .orders
        .checkout(principal)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(CheckoutResponse {
        message: "Checkout successful. Order placed.".to_string(),
        order: order.into(),
    }))
}
