//! Session-token identity resolution
//!
//! The auth layer resolves bearer tokens through the `IdentityResolver`
//! trait so tests can substitute stubs; the production resolver looks the
//! token up in the sessions table.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::DbError;

/// The verified principal for one request.
///
/// Constructed by the auth middleware, attached to request extensions,
/// discarded at request end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
}

/// Resolves a presented credential to a verified identity.
///
/// `Ok(None)` means the credential is unknown or expired (a 401 upstream);
/// `Err` means the lookup itself failed and maps to a server fault.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, DbError>;
}

/// Session repository backed by the sessions table.
///
/// Owns a pool handle because it lives in shared application state for the
/// lifetime of the process.
pub struct SessionRepo {
    pool: PgPool,
}

impl SessionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityResolver for SessionRepo {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, DbError> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT user_id
            FROM sessions
            WHERE token = $1
              AND (expires_at IS NULL OR expires_at > NOW())
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(user_id,)| Identity { user_id }))
    }
}
