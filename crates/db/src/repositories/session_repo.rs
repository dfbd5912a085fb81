//! Repository for the `sessions` table.

use filegate_core::session::{NewSession, SessionTokens};
use filegate_core::types::SessionId;
use sqlx::PgPool;

use crate::models::session::SessionRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "session_id, user_id, access_token_hash, refresh_token_hash, \
                        access_expires_at, refresh_expires_at, is_active, \
                        device_info, ip_address, created_at, last_activity";

/// Provides the session queries used by the lifecycle, the guard, and the sweep.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session with a caller-allocated id, returning that id.
    pub async fn create(pool: &PgPool, input: &NewSession) -> Result<SessionId, sqlx::Error> {
        sqlx::query_scalar::<_, SessionId>(
            "INSERT INTO sessions
                (session_id, user_id, access_token_hash, refresh_token_hash,
                 access_expires_at, refresh_expires_at, device_info, ip_address)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING session_id",
        )
        .bind(input.session_id)
        .bind(&input.user_id)
        .bind(&input.access_token_hash)
        .bind(&input.refresh_token_hash)
        .bind(input.access_expires_at)
        .bind(input.refresh_expires_at)
        .bind(&input.device_info)
        .bind(&input.ip_address)
        .fetch_one(pool)
        .await
    }

    /// Find an active session by its current refresh token hash.
    ///
    /// Expiry is not filtered here; the caller compares `refresh_expires_at`
    /// so an expired token is reported as such.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<SessionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE refresh_token_hash = $1
               AND is_active = TRUE"
        );
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Find an active session by id.
    pub async fn find_by_id(pool: &PgPool, id: SessionId) -> Result<Option<SessionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE session_id = $1
               AND is_active = TRUE"
        );
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite both token hashes and expiries. Returns `true` if the row was updated.
    pub async fn update_tokens(
        pool: &PgPool,
        id: SessionId,
        tokens: &SessionTokens,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions
             SET access_token_hash = $2,
                 refresh_token_hash = $3,
                 access_expires_at = $4,
                 refresh_expires_at = $5,
                 last_activity = NOW()
             WHERE session_id = $1",
        )
        .bind(id)
        .bind(&tokens.access_token_hash)
        .bind(&tokens.refresh_token_hash)
        .bind(tokens.access_expires_at)
        .bind(tokens.refresh_expires_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the token pair only if the stored refresh hash is still
    /// `expected_refresh_hash`. Returns `false` if a concurrent rotation won.
    pub async fn rotate_tokens(
        pool: &PgPool,
        id: SessionId,
        expected_refresh_hash: &str,
        tokens: &SessionTokens,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions
             SET access_token_hash = $3,
                 refresh_token_hash = $4,
                 access_expires_at = $5,
                 refresh_expires_at = $6,
                 last_activity = NOW()
             WHERE session_id = $1
               AND refresh_token_hash = $2
               AND is_active = TRUE",
        )
        .bind(id)
        .bind(expected_refresh_hash)
        .bind(&tokens.access_token_hash)
        .bind(&tokens.refresh_token_hash)
        .bind(tokens.access_expires_at)
        .bind(tokens.refresh_expires_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete one session owned by `user_id`. Returns `true` if a row was deleted.
    pub async fn delete_for_owner(
        pool: &PgPool,
        id: SessionId,
        user_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE session_id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete sessions whose refresh token has expired. Returns the count of deleted rows.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE refresh_expires_at < NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
