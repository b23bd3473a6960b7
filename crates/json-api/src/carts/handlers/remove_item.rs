//! Remove From Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{add_item::CartMutationResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Remove From Cart Handler
///
/// Deletes one line from the caller's cart; the total is recomputed from the
/// remaining lines.
#[endpoint(
    tags("carts"),
    summary = "Remove From Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let cart = state
        .app
        .carts
        .remove_item(principal, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartMutationResponse {
        message: "Product removed from cart successfully".to_string(),
        cart: cart.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::{CartsServiceError, MockCartsService};
    use storefront_app::domain::catalog::models::ProductUuid;

    use crate::test_helpers::{
        TEST_CUSTOMER, inject_customer, make_cart, service_as, state_with_carts,
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        service_as(
            state_with_carts(carts),
            inject_customer,
            Router::with_path("cart/{product}/remove-from-cart").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_item_returns_remaining_cart() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |principal, p| *principal == TEST_CUSTOMER && *p == product)
            .return_once(|principal, _| Ok(make_cart(principal.user)));

        let mut res = TestClient::delete(format!(
            "http://example.com/cart/{product}/remove-from-cart"
        ))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartMutationResponse = res.take_json().await?;

        assert_eq!(body.message, "Product removed from cart successfully");

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_missing_line_returns_404() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ItemNotFound));

        let res = TestClient::delete(format!(
            "http://example.com/cart/{product}/remove-from-cart"
        ))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
