//! Mark Order Received Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, track::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MarkReceivedResponse {
    pub message: String,
    pub order: OrderResponse,
}

/// Mark Order Received Handler
///
/// The order's owner confirms delivery. Only an order currently out for
/// delivery can be marked; the transition is final.
#[endpoint(
    tags("orders"),
    summary = "Mark Order Received",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order marked as received"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order is not out for delivery"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller does not own the order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MarkReceivedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let order = state
        .app
        .orders
        .mark_received(principal, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(MarkReceivedResponse {
        message: "Order marked as received".to_string(),
        order: order.into(),
    }))
}
