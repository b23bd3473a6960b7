//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::catalog::models::{NewProduct, ProductUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    /// Price in cents
    pub price: u64,
}

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCreatedResponse {
    pub message: String,
    pub product: ProductResponse,
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator role required"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let request = json.into_inner();

    if request.name.trim().is_empty() {
        return Err(StatusError::bad_request().brief("All fields are required and must be valid"));
    }

    let new_product = NewProduct {
        uuid: ProductUuid::new(),
        name: request.name,
        description: request.description,
        price: request.price,
    };

    let product = state
        .app
        .catalog
        .create_product(principal, new_product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductCreatedResponse {
        message: "Product created successfully".to_string(),
        product: product.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::catalog::{CatalogServiceError, MockCatalogService};

    use crate::test_helpers::{
        TEST_ADMIN, inject_admin, inject_customer, make_product, service_as, state_with_catalog,
    };

    use super::*;

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_product()
            .once()
            .withf(|principal, new| {
                *principal == TEST_ADMIN && new.name == "Widget" && new.price == 1000
            })
            .return_once(|_, new| Ok(make_product(new.uuid)));

        let service = service_as(
            state_with_catalog(catalog),
            inject_admin,
            Router::with_path("products").post(handler),
        );

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Widget", "description": "A widget", "price": 1000 }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: ProductCreatedResponse = res.take_json().await?;

        assert_eq!(body.message, "Product created successfully");
        assert_eq!(body.product.name, "Widget");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_forbidden_for_customer() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(CatalogServiceError::Forbidden));

        let service = service_as(
            state_with_catalog(catalog),
            inject_customer,
            Router::with_path("products").post(handler),
        );

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Widget", "price": 1000 }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_blank_name_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_create_product().never();

        let service = service_as(
            state_with_catalog(catalog),
            inject_admin,
            Router::with_path("products").post(handler),
        );

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "  ", "price": 1000 }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
