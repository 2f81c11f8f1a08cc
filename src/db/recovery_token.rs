//! Recovery token repository.
//!
//! Recovery tokens are opaque hex strings mailed inside a recovery link.
//! Possession of an unexpired token authorizes a password reset; the token
//! is consumed on use.

use super::DbPool;
use crate::{MedokaError, Result};

/// Recovery token entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecoveryToken {
    /// Token row ID.
    pub id: i64,
    /// Opaque token string (16 hex characters).
    pub token: String,
    /// Owning manager ID.
    pub manager_id: i64,
    /// Expiration timestamp.
    pub expires_at: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// Repository for recovery token operations.
pub struct RecoveryTokenRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> RecoveryTokenRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Issue a new token for a manager, invalidating any outstanding tokens.
    pub async fn issue(
        &self,
        manager_id: i64,
        token: &str,
        expires_at: &str,
    ) -> Result<RecoveryToken> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        sqlx::query("DELETE FROM recovery_tokens WHERE manager_id = $1")
            .bind(manager_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        let row = sqlx::query_as::<_, RecoveryToken>(
            "INSERT INTO recovery_tokens (token, manager_id, expires_at)
             VALUES ($1, $2, $3)
             RETURNING id, token, manager_id, expires_at, created_at",
        )
        .bind(token)
        .bind(manager_id)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| MedokaError::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(row)
    }

    /// Consume a valid (unexpired) token by its string.
    ///
    /// Deletes and returns the row in one statement so a token can only be
    /// used once. Returns None when no matching unexpired token exists.
    pub async fn consume(&self, token: &str) -> Result<Option<RecoveryToken>> {
        let row = sqlx::query_as::<_, RecoveryToken>(
            "DELETE FROM recovery_tokens
             WHERE token = $1
               AND expires_at > datetime('now')
             RETURNING id, token, manager_id, expires_at, created_at",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(row)
    }

    /// Delete expired tokens (cleanup).
    pub async fn cleanup_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM recovery_tokens WHERE expires_at < datetime('now')")
            .execute(self.pool)
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
