//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::Forbidden => {
            StatusError::forbidden().brief("Admins are not allowed to modify carts.")
        }
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart not found."),
        CartsServiceError::ItemNotFound => {
            StatusError::not_found().brief("Product not found in cart.")
        }
        CartsServiceError::ProductNotFound | CartsServiceError::ProductInactive => {
            StatusError::not_found().brief("Product not found or inactive.")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Invalid productId or quantity.")
        }
        CartsServiceError::AmountOverflow => {
            StatusError::bad_request().brief("Cart amount overflow.")
        }
        CartsServiceError::AlreadyExists => StatusError::conflict().brief("Cart already exists."),
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload.")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
