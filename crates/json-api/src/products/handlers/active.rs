//! Active Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{errors::into_status_error, index::ProductsResponse},
    state::State,
};

/// Active Products Handler
///
/// Returns the purchasable products for any authenticated caller.
#[endpoint(
    tags("products"),
    summary = "List Active Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .catalog
        .list_active_products()
        .await
        .map_err(into_status_error)?;

    if products.is_empty() {
        return Err(StatusError::not_found().brief("No active products found"));
    }

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::catalog::{MockCatalogService, models::ProductUuid};

    use crate::test_helpers::{inject_customer, make_product, service_as, state_with_catalog};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        service_as(
            state_with_catalog(catalog),
            inject_customer,
            Router::with_path("products/active").get(handler),
        )
    }

    #[tokio::test]
    async fn test_active_returns_products() -> TestResult {
        let uuid = ProductUuid::new();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_active_products()
            .once()
            .return_once(move || Ok(vec![make_product(uuid)]));

        let response: ProductsResponse = TestClient::get("http://example.com/products/active")
            .send(&make_service(catalog))
            .await
            .take_json()
            .await?;

        assert_eq!(response.products.len(), 1);
        assert!(response.products[0].is_active);

        Ok(())
    }

    #[tokio::test]
    async fn test_active_empty_returns_404() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_active_products()
            .once()
            .return_once(|| Ok(vec![]));

        let res = TestClient::get("http://example.com/products/active")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
