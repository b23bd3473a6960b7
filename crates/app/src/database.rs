//! Database connection management

use std::time::Duration;

use sqlx::{PgPool, Postgres, Transaction, postgres::PgPoolOptions};

/// Upper bound on waiting for a pool connection; a saturated or unreachable
/// database surfaces as `PoolTimedOut` instead of an unbounded hang.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// Every service operation runs inside one of these; the cart row lock
    /// taken inside the transaction serializes concurrent mutations of the
    /// same user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}

fn pool_options() -> PgPoolOptions {
    PgPoolOptions::new().acquire_timeout(ACQUIRE_TIMEOUT)
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    pool_options().connect(database_url).await
}

#[cfg(test)]
pub(crate) fn lazy_test_pool() -> PgPool {
    // Never actually connects; used to exercise guard paths that fail before
    // any query is issued.
    PgPool::connect_lazy("postgres://localhost/storefront_test")
        .unwrap_or_else(|_| unreachable!("lazy pool construction does not touch the network"))
}
