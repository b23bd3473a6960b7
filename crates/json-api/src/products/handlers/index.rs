//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns every product, active or archived. Administrator only.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let products = state
        .app
        .catalog
        .list_products(principal)
        .await
        .map_err(into_status_error)?;

    if products.is_empty() {
        return Err(StatusError::not_found().brief("No products found"));
    }

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::catalog::{
        CatalogServiceError, MockCatalogService, models::ProductUuid,
    };

    use crate::test_helpers::{
        TEST_ADMIN, TEST_CUSTOMER, inject_admin, inject_customer, make_product, service_as,
        state_with_catalog,
    };

    use super::*;

    #[tokio::test]
    async fn test_index_returns_products_for_admin() -> TestResult {
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_products()
            .once()
            .withf(|principal| *principal == TEST_ADMIN)
            .return_once(move |_| Ok(vec![make_product(uuid_a), make_product(uuid_b)]));

        let service = service_as(
            state_with_catalog(catalog),
            inject_admin,
            Router::with_path("products").get(handler),
        );

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.products.len(), 2, "expected two products");
        assert_eq!(response.products[0].uuid, uuid_a.into_uuid());
        assert_eq!(response.products[1].uuid, uuid_b.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forbidden_for_customer() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_products()
            .once()
            .withf(|principal| *principal == TEST_CUSTOMER)
            .return_once(|_| Err(CatalogServiceError::Forbidden));

        let service = service_as(
            state_with_catalog(catalog),
            inject_customer,
            Router::with_path("products").get(handler),
        );

        let res = TestClient::get("http://example.com/products")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_empty_catalog_returns_404() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_products()
            .once()
            .return_once(|_| Ok(vec![]));

        let service = service_as(
            state_with_catalog(catalog),
            inject_admin,
            Router::with_path("products").get(handler),
        );

        let res = TestClient::get("http://example.com/products")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
