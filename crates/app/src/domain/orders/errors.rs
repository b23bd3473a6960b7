//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{catalog::models::ProductUuid, orders::status::OrderStatus};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("caller is not allowed to perform this operation")]
    Forbidden,

    #[error("no cart found for the current user")]
    CartNotFound,

    #[error("cart is empty")]
    EmptyCart,

    /// A cart line failed checkout-time validation; the whole checkout is
    /// rejected, never just the offending line.
    #[error("product {0} is invalid or inactive")]
    InvalidItem(ProductUuid),

    #[error("order not found")]
    NotFound,

    #[error("invalid status value: {0:?}")]
    InvalidStatus(String),

    /// The order's current status does not allow the requested transition.
    #[error("cannot transition order from status {0}")]
    InvalidTransition(OrderStatus),

    #[error("order amount overflow")]
    AmountOverflow,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("order already exists")]
    AlreadyExists,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
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
