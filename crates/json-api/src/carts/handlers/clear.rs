//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{add_item::CartMutationResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Clear Cart Handler
///
/// Empties the caller's cart and zeroes its total.
#[endpoint(tags("carts"), summary = "Clear Cart", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let cart = state
        .app
        .carts
        .clear_cart(principal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartMutationResponse {
        message: "Cart cleared successfully.".to_string(),
        cart: cart.into(),
    }))
}
