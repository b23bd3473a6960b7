//! All Orders Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, track::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Number of orders returned
    pub count: usize,

    /// The orders, newest first
    pub data: Vec<OrderResponse>,
}

/// All Orders Handler
///
/// Returns every order in the store. Administrator only.
#[endpoint(
    tags("orders"),
    summary = "List All Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let orders = state
        .app
        .orders
        .list_all_orders(principal)
        .await
        .map_err(into_status_error)?;

    if orders.is_empty() {
        return Err(StatusError::not_found().brief("No orders found."));
    }

    Ok(Json(OrdersResponse {
        count: orders.len(),
        data: orders.into_iter().map(Into::into).collect(),
    }))
}
