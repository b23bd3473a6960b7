//! Identity service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityServiceError {
    #[error("unknown token")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for IdentityServiceError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
