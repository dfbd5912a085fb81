//! [`PgStore`]: the PostgreSQL implementation of the storage traits.

use async_trait::async_trait;
use filegate_core::session::{NewSession, Session, SessionTokens};
use filegate_core::store::{SessionStore, StoreError, UserStore};
use filegate_core::types::SessionId;
use filegate_core::user::{NewUser, User};

use crate::repositories::{SessionRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Users and sessions stored in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Classify a sqlx error: unique violations become [`StoreError::Duplicate`],
/// everything else is a backend failure.
fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            return StoreError::Duplicate(constraint);
        }
    }
    tracing::error!(error = %err, "Database error");
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError> {
        UserRepo::create(&self.pool, &user.id, &user.password_hash)
            .await
            .map(User::from)
            .map_err(store_error)
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        UserRepo::find_by_id(&self.pool, id)
            .await
            .map(|row| row.map(User::from))
            .map_err(store_error)
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn create(&self, session: &NewSession) -> Result<SessionId, StoreError> {
        SessionRepo::create(&self.pool, session)
            .await
            .map_err(store_error)
    }

    async fn find_by_refresh_digest(&self, digest: &str) -> Result<Option<Session>, StoreError> {
        SessionRepo::find_by_refresh_token_hash(&self.pool, digest)
            .await
            .map(|row| row.map(Session::from))
            .map_err(store_error)
    }

    async fn find_by_session_id(&self, id: SessionId) -> Result<Option<Session>, StoreError> {
        SessionRepo::find_by_id(&self.pool, id)
            .await
            .map(|row| row.map(Session::from))
            .map_err(store_error)
    }

    async fn update(&self, id: SessionId, tokens: &SessionTokens) -> Result<bool, StoreError> {
        SessionRepo::update_tokens(&self.pool, id, tokens)
            .await
            .map_err(store_error)
    }

    async fn rotate(
        &self,
        id: SessionId,
        expected_refresh_digest: &str,
        tokens: &SessionTokens,
    ) -> Result<bool, StoreError> {
        SessionRepo::rotate_tokens(&self.pool, id, expected_refresh_digest, tokens)
            .await
            .map_err(store_error)
    }

    async fn delete_by_session_id_and_owner(
        &self,
        id: SessionId,
        user_id: &str,
    ) -> Result<bool, StoreError> {
        SessionRepo::delete_for_owner(&self.pool, id, user_id)
            .await
            .map_err(store_error)
    }

    async fn delete_expired(&self) -> Result<u64, StoreError> {
        SessionRepo::cleanup_expired(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(store_error)
    }
}
