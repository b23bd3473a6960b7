//! Update Product Handler

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

use storefront_app::domain::catalog::models::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Update Product Request
///
/// Absent fields are left untouched.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Price in cents
    pub price: Option<u64>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            price: request.price,
        }
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let product = state
        .app
        .catalog
        .update_product(principal, product.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::catalog::{
        CatalogServiceError, MockCatalogService, models::ProductUuid,
    };

    use crate::test_helpers::{
        TEST_ADMIN, inject_admin, make_product, service_as, state_with_catalog,
    };

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        service_as(
            state_with_catalog(catalog),
            inject_admin,
            Router::with_path("products/{product}").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_update_product_success() -> TestResult {
        let uuid = ProductUuid::new();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_update_product()
            .once()
            .withf(move |principal, u, update| {
                *principal == TEST_ADMIN && *u == uuid && update.price == Some(1500)
            })
            .return_once(move |_, _, _| Ok(make_product(uuid)));

        let mut res = TestClient::patch(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "price": 1500 }))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_404() -> TestResult {
        let uuid = ProductUuid::new();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_update_product()
            .once()
            .return_once(|_, _, _| Err(CatalogServiceError::NotFound));

        let res = TestClient::patch(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "price": 1500 }))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
