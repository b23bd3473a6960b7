//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::pricing::PricingError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    /// Administrators cannot own carts; this is a business rule, not an
    /// oversight.
    #[error("administrators cannot modify carts")]
    Forbidden,

    #[error("cart not found")]
    NotFound,

    #[error("product not found in cart")]
    ItemNotFound,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("product not found")]
    ProductNotFound,

    #[error("product is inactive")]
    ProductInactive,

    #[error("cart amount overflow")]
    AmountOverflow,

    #[error("cart already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<PricingError> for CartsServiceError {
    fn from(error: PricingError) -> Self {
        match error {
            PricingError::ProductNotFound(_) => Self::ProductNotFound,
            PricingError::ProductInactive(_) => Self::ProductInactive,
            PricingError::AmountOverflow => Self::AmountOverflow,
        }
    }
}
