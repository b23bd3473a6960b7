//! App Router

use salvo::{affix_state::inject, catch_panic::CatchPanic, prelude::*, trailing_slash::remove_slash};

use storefront_app::context::AppContext;

use crate::{auth, carts, healthcheck, orders, products, state::State};

/// Everything except the healthcheck sits behind the bearer-auth hoop. The
/// route names under `/cart` and `/orders` are the wire surface the existing
/// clients already speak, kept verbatim.
pub(crate) fn app_router(app: AppContext) -> Router {
    Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("products")
                        .get(products::index::handler)
                        .post(products::create::handler)
                        .push(Router::with_path("active").get(products::active::handler))
                        .push(
                            Router::with_path("search-by-name")
                                .post(products::search_by_name::handler),
                        )
                        .push(
                            Router::with_path("search-by-price")
                                .post(products::search_by_price::handler),
                        )
                        .push(
                            Router::with_path("{product}")
                                .get(products::get::handler)
                                .patch(products::update::handler)
                                .push(
                                    Router::with_path("archive").patch(products::archive::handler),
                                )
                                .push(
                                    Router::with_path("activate")
                                        .patch(products::activate::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("cart")
                        .push(Router::with_path("get-cart").get(carts::get::handler))
                        .push(Router::with_path("add-to-cart").post(carts::add_item::handler))
                        .push(
                            Router::with_path("update-cart-quantity")
                                .patch(carts::update_quantity::handler),
                        )
                        .push(
                            Router::with_path("{product}/remove-from-cart")
                                .delete(carts::remove_item::handler),
                        )
                        .push(Router::with_path("clear-cart").put(carts::clear::handler)),
                )
                .push(
                    Router::with_path("orders")
                        .push(Router::with_path("checkout").post(orders::checkout::handler))
                        .push(Router::with_path("all-orders").get(orders::index::handler))
                        .push(Router::with_path("my-orders").get(orders::mine::handler))
                        .push(Router::with_path("track/{order}").get(orders::track::handler))
                        .push(
                            Router::with_path("update-status/{order}")
                                .patch(orders::update_status::handler),
                        )
                        .push(
                            Router::with_path("mark-received/{order}")
                                .patch(orders::mark_received::handler),
                        ),
                ),
        )
}
