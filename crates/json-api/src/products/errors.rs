//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::Forbidden => StatusError::forbidden().brief("Forbidden: Admins only"),
        CatalogServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        CatalogServiceError::NotFound => StatusError::not_found().brief("Product not found."),
        CatalogServiceError::InvalidReference
        | CatalogServiceError::MissingRequiredData
        | CatalogServiceError::InvalidData => {
            StatusError::bad_request().brief("All fields are required and must be valid")
        }
        CatalogServiceError::InvalidPrice(source) => {
            error!("product price out of range: {source}");

            StatusError::bad_request().brief("All fields are required and must be valid")
        }
        CatalogServiceError::Sql(source) => {
            error!("catalog storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
