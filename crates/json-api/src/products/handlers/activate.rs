//! Activate Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Activate Product Handler
///
/// Puts an archived product back on sale.
#[endpoint(
    tags("products"),
    summary = "Activate Product",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let product = state
        .app
        .catalog
        .set_product_active(principal, product.into_inner().into(), true)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
