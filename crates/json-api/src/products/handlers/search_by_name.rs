//! Product Search By Name Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Product Name Search Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchByNameRequest {
    /// Case-insensitive substring to match against product names
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SearchProductsResponse {
    pub success: bool,
    pub data: Vec<ProductResponse>,
}

/// Product Search By Name Handler
///
/// Searches the active products by name, case-insensitively.
#[endpoint(
    tags("products"),
    summary = "Search Products By Name",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    json: JsonBody<SearchByNameRequest>,
    depot: &mut Depot,
) -> Result<Json<SearchProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;

    let name = json.into_inner().name;

    if name.trim().is_empty() {
        return Err(StatusError::bad_request().brief("Product name is required"));
    }

    let products = state
        .app
        .catalog
        .search_by_name(&name)
        .await
        .map_err(into_status_error)?;

    if products.is_empty() {
        return Err(StatusError::not_found().brief("No products found"));
    }

    Ok(Json(SearchProductsResponse {
        success: true,
        data: products.into_iter().map(Into::into).collect(),
    }))
}
