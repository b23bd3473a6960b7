//! Product Search By Price Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::{errors::into_status_error, search_by_name::SearchProductsResponse},
    state::State,
};

/// Product Price Search Request
///
/// Prices are integer cents; bounds are inclusive and at least one must be
/// given.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchByPriceRequest {
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
}

/// Product Search By Price Handler
///
/// Searches the active products within a price range.
#[endpoint(
    tags("products"),
    summary = "Search Products By Price",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    json: JsonBody<SearchByPriceRequest>,
    depot: &mut Depot,
) -> Result<Json<SearchProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;

    let request = json.into_inner();

    if request.min_price.is_none() && request.max_price.is_none() {
        return Err(StatusError::bad_request().brief("Price range is required"));
    }

    let products = state
        .app
        .catalog
        .search_by_price(request.min_price, request.max_price)
        .await
        .map_err(into_status_error)?;

    if products.is_empty() {
        return Err(StatusError::not_found().brief("No products found in this price range"));
    }

    Ok(Json(SearchProductsResponse {
        success: true,
        data: products.into_iter().map(Into::into).collect(),
    }))
}
