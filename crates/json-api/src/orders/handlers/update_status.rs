//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, track::OrderResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    /// The target status; matched case-insensitively against the enumerated
    /// values
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusResponse {
    pub message: String,
    pub order: OrderResponse,
}

/// Update Order Status Handler
///
/// Sets an order to any enumerated status. Administrator only.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<UpdateStatusResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let order = state
        .app
        .orders
        .update_status(principal, order.into_inner().into(), &json.into_inner().status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(UpdateStatusResponse {
        message: format!("Order status updated to {}", order.status),
        order: order.into(),
    }))
}
