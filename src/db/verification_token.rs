//! Verification token repository.
//!
//! Verification tokens are one-time 6-digit codes mailed at registration to
//! prove email ownership. A code is bound to one manager, expires, and is
//! consumed atomically on use.

use super::DbPool;
use crate::{MedokaError, Result};

/// Verification token entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VerificationToken {
    /// Token row ID.
    pub id: i64,
    /// 6-digit verification code.
    pub token: i64,
    /// Owning manager ID.
    pub manager_id: i64,
    /// Expiration timestamp.
    pub expires_at: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// Repository for verification token operations.
pub struct VerificationTokenRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> VerificationTokenRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Issue a new code for a manager, invalidating any outstanding codes.
    pub async fn issue(
        &self,
        manager_id: i64,
        code: i64,
        expires_at: &str,
    ) -> Result<VerificationToken> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        sqlx::query("DELETE FROM verification_tokens WHERE manager_id = $1")
            .bind(manager_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        let token = sqlx::query_as::<_, VerificationToken>(
            "INSERT INTO verification_tokens (token, manager_id, expires_at)
             VALUES ($1, $2, $3)
             RETURNING id, token, manager_id, expires_at, created_at",
        )
        .bind(code)
        .bind(manager_id)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| MedokaError::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(token)
    }

    /// Consume a valid (matching, unexpired) code for a manager.
    ///
    /// The row is deleted and returned in one statement, so a code can only
    /// be consumed once even under concurrent requests. Returns None when no
    /// matching unexpired code exists.
    pub async fn consume(&self, manager_id: i64, code: i64) -> Result<Option<VerificationToken>> {
        let token = sqlx::query_as::<_, VerificationToken>(
            "DELETE FROM verification_tokens
             WHERE manager_id = $1
               AND token = $2
               AND expires_at > datetime('now')
             RETURNING id, token, manager_id, expires_at, created_at",
        )
        .bind(manager_id)
        .bind(code)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(token)
    }

    /// Delete expired tokens (cleanup).
    pub async fn cleanup_expired(&self) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM verification_tokens WHERE expires_at < datetime('now')")
                .execute(self.pool)
                .await
                .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
