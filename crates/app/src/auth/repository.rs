//! Identity Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::auth::models::{Principal, UserUuid};

const FIND_PRINCIPAL_SQL: &str = include_str!("sql/find_principal_by_token_digest.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgIdentityRepository;

impl PgIdentityRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_principal_by_token_digest(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        digest: &str,
    ) -> Result<Principal, sqlx::Error> {
        query_as::<Postgres, Principal>(FIND_PRINCIPAL_SQL)
            .bind(digest)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Principal {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user: UserUuid::from_uuid(row.try_get("uuid")?),
            is_admin: row.try_get("is_admin")?,
        })
    }
}
