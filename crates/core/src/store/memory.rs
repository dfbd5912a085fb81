//! In-process store backed by hash maps.
//!
//! Used by the HTTP integration tests and the lifecycle unit tests. Each
//! operation takes the relevant lock once, so `rotate` is a true
//! compare-and-swap.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{SessionStore, StoreError, UserStore};
use crate::session::{NewSession, Session, SessionTokens};
use crate::types::{SessionId, UserId};
use crate::user::{NewUser, User};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All active sessions owned by `user_id`, oldest first.
    pub async fn sessions_for(&self, user_id: &str) -> Vec<Session> {
        let sessions = self.sessions.read().await;
        let mut owned: Vec<Session> = sessions
            .values()
            .filter(|s| s.is_active && s.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(|s| s.created_at);
        owned
    }

    /// Total number of session rows, active or not.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn apply_tokens(session: &mut Session, tokens: &SessionTokens) {
    session.access_token_hash = tokens.access_token_hash.clone();
    session.refresh_token_hash = tokens.refresh_token_hash.clone();
    session.access_expires_at = tokens.access_expires_at;
    session.refresh_expires_at = tokens.refresh_expires_at;
    session.last_activity = Utc::now();
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(StoreError::Duplicate(format!("users.id = {}", user.id)));
        }

        let row = User {
            id: user.id.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.insert(row.id.clone(), row.clone());
        Ok(row)
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create(&self, session: &NewSession) -> Result<SessionId, StoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.session_id) {
            return Err(StoreError::Duplicate(format!(
                "sessions.session_id = {}",
                session.session_id
            )));
        }

        let now = Utc::now();
        sessions.insert(
            session.session_id,
            Session {
                session_id: session.session_id,
                user_id: session.user_id.clone(),
                access_token_hash: session.access_token_hash.clone(),
                refresh_token_hash: session.refresh_token_hash.clone(),
                access_expires_at: session.access_expires_at,
                refresh_expires_at: session.refresh_expires_at,
                is_active: true,
                device_info: session.device_info.clone(),
                ip_address: session.ip_address.clone(),
                created_at: now,
                last_activity: now,
            },
        );
        Ok(session.session_id)
    }

    async fn find_by_refresh_digest(&self, digest: &str) -> Result<Option<Session>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .find(|s| s.is_active && s.refresh_token_hash == digest)
            .cloned())
    }

    async fn find_by_session_id(&self, id: SessionId) -> Result<Option<Session>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&id).filter(|s| s.is_active).cloned())
    }

    async fn update(&self, id: SessionId, tokens: &SessionTokens) -> Result<bool, StoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some(session) => {
                apply_tokens(session, tokens);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn rotate(
        &self,
        id: SessionId,
        expected_refresh_digest: &str,
        tokens: &SessionTokens,
    ) -> Result<bool, StoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some(session)
                if session.is_active && session.refresh_token_hash == expected_refresh_digest =>
            {
                apply_tokens(session, tokens);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_by_session_id_and_owner(
        &self,
        id: SessionId,
        user_id: &str,
    ) -> Result<bool, StoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.get(&id).is_some_and(|s| s.user_id == user_id) {
            sessions.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn delete_expired(&self) -> Result<u64, StoreError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.refresh_expires_at >= now);
        Ok((before - sessions.len()) as u64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
