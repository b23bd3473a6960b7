//! Identity service.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use mockall::automock;
use sha2::{Digest, Sha256};

use crate::{
    auth::{errors::IdentityServiceError, models::Principal, repository::PgIdentityRepository},
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgIdentityService {
    db: Db,
    repository: PgIdentityRepository,
}

impl PgIdentityService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgIdentityRepository::new(),
        }
    }
}

#[async_trait]
impl IdentityService for PgIdentityService {
    async fn authenticate_bearer(&self, token: &str) -> Result<Principal, IdentityServiceError> {
        let digest = token_digest(token);

        let mut tx = self.db.begin().await?;

        let principal = self
            .repository
            .find_principal_by_token_digest(&mut tx, &digest)
            .await?;

        tx.commit().await?;

        Ok(principal)
    }
}

#[automock]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolve a bearer token to the principal it was issued to.
    async fn authenticate_bearer(&self, token: &str) -> Result<Principal, IdentityServiceError>;
}

/// Tokens are stored as SHA-256 digests; the plaintext never touches the
/// database.
fn token_digest(token: &str) -> String {
    STANDARD.encode(Sha256::digest(token.as_bytes()))
}
