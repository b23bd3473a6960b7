//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{MockIdentityService, Principal, UserUuid},
    context::AppContext,
    domain::{
        carts::{MockCartsService, models::Cart, models::CartUuid},
        catalog::{MockCatalogService, models::Product, models::ProductUuid},
        orders::{MockOrdersService, OrderStatus, models::Order, models::OrderUuid},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_CUSTOMER: Principal =
    Principal::customer(UserUuid::from_uuid(Uuid::nil()));

pub(crate) const TEST_ADMIN: Principal =
    Principal::admin(UserUuid::from_uuid(Uuid::from_u128(1)));

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(TEST_CUSTOMER);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(TEST_ADMIN);
    ctrl.call_next(req, depot, res).await;
}

fn strict_identity_mock() -> MockIdentityService {
    let mut identity = MockIdentityService::new();

    identity.expect_authenticate_bearer().never();

    identity
}

fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_list_products().never();
    catalog.expect_list_active_products().never();
    catalog.expect_get_product().never();
    catalog.expect_create_product().never();
    catalog.expect_update_product().never();
    catalog.expect_search_by_name().never();
    catalog.expect_search_by_price().never();
    catalog.expect_set_product_active().never();

    catalog
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_view_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_checkout().never();
    orders.expect_track_order().never();
    orders.expect_list_my_orders().never();
    orders.expect_list_all_orders().never();
    orders.expect_update_status().never();
    orders.expect_mark_received().never();

    orders
}

fn make_state(
    identity: MockIdentityService,
    catalog: MockCatalogService,
    carts: MockCartsService,
    orders: MockOrdersService,
) -> Arc<State> {
    Arc::new(State::new(AppContext {
        identity: Arc::new(identity),
        catalog: Arc::new(catalog),
        carts: Arc::new(carts),
        orders: Arc::new(orders),
    }))
}

pub(crate) fn state_with_identity(identity: MockIdentityService) -> Arc<State> {
    make_state(
        identity,
        strict_catalog_mock(),
        strict_carts_mock(),
        strict_orders_mock(),
    )
}

pub(crate) fn state_with_catalog(catalog: MockCatalogService) -> Arc<State> {
    make_state(
        strict_identity_mock(),
        catalog,
        strict_carts_mock(),
        strict_orders_mock(),
    )
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    make_state(
        strict_identity_mock(),
        strict_catalog_mock(),
        carts,
        strict_orders_mock(),
    )
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    make_state(
        strict_identity_mock(),
        strict_catalog_mock(),
        strict_carts_mock(),
        orders,
    )
}

/// Wire a route behind the state and a principal-injecting hoop, the way
/// [`crate::router::app_router`] wires the real middleware.
pub(crate) fn service_as<H: Handler>(state: Arc<State>, principal_hoop: H, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(principal_hoop)
            .push(route),
    )
}

pub(crate) fn make_product(uuid: ProductUuid) -> Product {
    Product {
        uuid,
        name: "Widget".to_string(),
        description: Some("A widget".to_string()),
        price: 1000,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(owner: UserUuid) -> Cart {
    Cart {
        uuid: CartUuid::new(),
        owner,
        items: Vec::new(),
        total: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(owner: UserUuid, status: OrderStatus) -> Order {
    Order {
        uuid: OrderUuid::new(),
        owner,
        items: Vec::new(),
        total: 0,
        status,
        created_at: Timestamp::UNIX_EPOCH,
    }
}
