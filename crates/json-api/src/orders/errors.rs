//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Forbidden => StatusError::forbidden().brief("Not authorized"),
        OrdersServiceError::CartNotFound => {
            StatusError::not_found().brief("No cart found for the current user.")
        }
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Your cart is empty."),
        OrdersServiceError::InvalidItem(product) => StatusError::bad_request()
            .brief(format!("Product {product} is invalid or inactive.")),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::InvalidStatus(_) => {
            StatusError::bad_request().brief("Invalid status value")
        }
        OrdersServiceError::InvalidTransition(current) => StatusError::bad_request().brief(
            format!("Cannot mark order as received. Current status: \"{current}\""),
        ),
        OrdersServiceError::AmountOverflow => {
            StatusError::bad_request().brief("Order amount overflow.")
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists."),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload.")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
