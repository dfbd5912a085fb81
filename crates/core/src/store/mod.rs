//! Storage capabilities consumed by the session lifecycle and the auth guard.
//!
//! Both traits are object safe and used as `Arc<dyn _>`, so the lifecycle
//! runs unchanged against PostgreSQL (`filegate_db::PgStore`) or the
//! in-process [`MemoryStore`]. Every lookup is an exact match.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::session::{NewSession, Session, SessionTokens};
use crate::types::SessionId;
use crate::user::{NewUser, User};

/// Failure reported by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique key already exists (e.g. a second signup for the same id).
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Durable user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with [`StoreError::Duplicate`] if the id is taken.
    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError>;

    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError>;
}

/// Durable session records; the single source of truth for session validity.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a new session row and return its id.
    async fn create(&self, session: &NewSession) -> Result<SessionId, StoreError>;

    /// Find an active session whose current refresh digest equals `digest`.
    async fn find_by_refresh_digest(&self, digest: &str) -> Result<Option<Session>, StoreError>;

    /// Find an active session by id.
    async fn find_by_session_id(&self, id: SessionId) -> Result<Option<Session>, StoreError>;

    /// Overwrite both digests and both expiries. Returns `false` if no row matched.
    async fn update(&self, id: SessionId, tokens: &SessionTokens) -> Result<bool, StoreError>;

    /// Like [`SessionStore::update`], but only while the stored refresh digest
    /// still equals `expected_refresh_digest`.
    ///
    /// Returns `false` when another rotation already replaced it, which makes
    /// each refresh token usable exactly once even under concurrent refreshes.
    async fn rotate(
        &self,
        id: SessionId,
        expected_refresh_digest: &str,
        tokens: &SessionTokens,
    ) -> Result<bool, StoreError>;

    /// Delete exactly one session, scoped to its owner. Returns `false` if
    /// nothing was deleted.
    async fn delete_by_session_id_and_owner(
        &self,
        id: SessionId,
        user_id: &str,
    ) -> Result<bool, StoreError>;

    /// Purge sessions whose refresh expiry has passed. Returns the count removed.
    async fn delete_expired(&self) -> Result<u64, StoreError>;

    /// Cheap liveness probe for health checks.
    async fn health_check(&self) -> Result<(), StoreError>;
}
