//! Order Handlers

pub(crate) mod checkout;
pub(crate) mod index;
pub(crate) mod mark_received;
pub(crate) mod mine;
pub(crate) mod track;
pub(crate) mod update_status;

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use storefront_app::domain::{
        catalog::models::ProductUuid,
        orders::{
            MockOrdersService, OrderStatus, OrdersServiceError,
            models::{Order, OrderItem, OrderUuid},
        },
    };

    use crate::test_helpers::{
        TEST_CUSTOMER, inject_admin, inject_customer, state_with_orders,
    };

    use super::*;

    fn make_order(uuid: OrderUuid, status: OrderStatus) -> Order {
        let product_a = ProductUuid::new();
        let product_b = ProductUuid::new();

        Order {
            uuid,
            owner: TEST_CUSTOMER.user,
            items: vec![
                OrderItem {
                    product: product_a,
                    quantity: 2,
                    subtotal: 2000,
                },
                OrderItem {
                    product: product_b,
                    quantity: 1,
                    subtotal: 500,
                },
            ],
            total: 2500,
            status,
            created_at: jiff::Timestamp::UNIX_EPOCH,
        }
    }

    /// Full lifecycle over the wire: checkout places a pending order, an
    /// administrator moves it out for delivery, the owner marks it received,
    /// and a second receipt attempt is rejected.
    #[tokio::test]
    async fn test_order_lifecycle_over_the_wire() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .return_once(move |_| Ok(make_order(uuid, OrderStatus::Pending)));

        orders
            .expect_update_status()
            .once()
            .withf(move |_, o, raw| *o == uuid && raw == "for_delivery")
            .return_once(move |_, o, _| Ok(make_order(o, OrderStatus::ForDelivery)));

        orders
            .expect_mark_received()
            .once()
            .withf(move |principal, o| *principal == TEST_CUSTOMER && *o == uuid)
            .return_once(move |_, o| Ok(make_order(o, OrderStatus::Delivered)));

        orders
            .expect_mark_received()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::InvalidTransition(OrderStatus::Delivered)));

        let router = Router::new()
            .hoop(inject(state_with_orders(orders)))
            .push(
                Router::new()
                    .hoop(inject_customer)
                    .push(Router::with_path("orders/checkout").post(checkout::handler))
                    .push(
                        Router::with_path("orders/mark-received/{order}")
                            .patch(mark_received::handler),
                    ),
            )
            .push(
                Router::new().hoop(inject_admin).push(
                    Router::with_path("orders/update-status/{order}")
                        .patch(update_status::handler),
                ),
            );

        let service = Service::new(router);

        let mut res = TestClient::post("http://example.com/orders/checkout")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let placed: checkout::CheckoutResponse = res.take_json().await?;

        assert_eq!(placed.order.total, 2500);
        assert_eq!(placed.order.status, "pending");

        let mut res = TestClient::patch(format!(
            "http://example.com/orders/update-status/{uuid}"
        ))
        .json(&serde_json::json!({ "status": "for_delivery" }))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let moved: update_status::UpdateStatusResponse = res.take_json().await?;

        assert_eq!(moved.order.status, "for_delivery");

        let mut res = TestClient::patch(format!(
            "http://example.com/orders/mark-received/{uuid}"
        ))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let received: mark_received::MarkReceivedResponse = res.take_json().await?;

        assert_eq!(received.message, "Order marked as received");
        assert_eq!(received.order.status, "delivered");

        let res = TestClient::patch(format!(
            "http://example.com/orders/mark-received/{uuid}"
        ))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
