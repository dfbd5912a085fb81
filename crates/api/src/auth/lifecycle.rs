//! Session lifecycle: issuance, refresh rotation, and revocation.
//!
//! Every login opens a new session row (sessions are additive per user, one
//! per device). The session id is allocated before the access token is
//! signed, so a single insert stores digests that match exactly the tokens
//! returned to the caller.
//!
//! Rotation is single-use: the store swaps the token pair only while the
//! presented refresh digest is still current, so a replayed or concurrently
//! reused refresh token is rejected.

use std::sync::Arc;

use chrono::Utc;
use filegate_core::error::CoreError;
use filegate_core::hashing::{digest_token, random_token, REFRESH_TOKEN_LENGTH};
use filegate_core::session::{NewSession, SessionIdentity, SessionTokens};
use filegate_core::store::{SessionStore, StoreError, UserStore};
use filegate_core::types::{SessionId, Timestamp};
use filegate_core::user::NewUser;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::jwt::{JwtConfig, TokenCodec};
use crate::auth::password::{hash_password, verify_password};

/// Tokens handed to the client after signup, signin, or refresh.
///
/// This is the only place raw tokens ever leave the service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime label, e.g. `"10m"`.
    pub access_token_expiry: String,
}

/// The caller's identity as returned by `/info`.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: String,
}

/// Advisory client metadata recorded on new sessions.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub device_info: Option<String>,
    pub ip_address: Option<String>,
}

/// Orchestrates users, sessions, and token minting.
pub struct SessionLifecycle {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    codec: TokenCodec,
    config: JwtConfig,
}

impl SessionLifecycle {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        codec: TokenCodec,
        config: JwtConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            codec,
            config,
        }
    }

    /// Register a new user and open their first session.
    pub async fn signup(
        &self,
        user_id: &str,
        password: &str,
        client: &ClientInfo,
    ) -> Result<TokenPair, CoreError> {
        if self.users.find_user(user_id).await?.is_some() {
            return Err(CoreError::UserExists);
        }

        let password_hash = hash_password(password)
            .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))?;

        let new_user = NewUser {
            id: user_id.to_string(),
            password_hash,
        };
        match self.users.create_user(&new_user).await {
            Ok(_) => {}
            // Lost a race with a concurrent signup for the same id.
            Err(StoreError::Duplicate(_)) => return Err(CoreError::UserExists),
            Err(e) => return Err(e.into()),
        }
        tracing::info!(user_id, "User registered");

        self.issue(user_id, client).await
    }

    /// Check credentials and open an additional session.
    ///
    /// An unknown id and a wrong password produce the same error.
    pub async fn signin(
        &self,
        user_id: &str,
        password: &str,
        client: &ClientInfo,
    ) -> Result<TokenPair, CoreError> {
        let user = self
            .users
            .find_user(user_id)
            .await?
            .ok_or(CoreError::InvalidCredentials)?;

        let password_valid = verify_password(password, &user.password_hash)
            .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))?;
        if !password_valid {
            return Err(CoreError::InvalidCredentials);
        }

        self.issue(&user.id, client).await
    }

    /// Open a new session for an already-authenticated user.
    pub async fn issue(&self, user_id: &str, client: &ClientInfo) -> Result<TokenPair, CoreError> {
        let now = Utc::now();
        let session_id = Uuid::new_v4();
        let (pair, tokens) = self.mint(user_id, session_id, now)?;

        let new_session = NewSession {
            session_id,
            user_id: user_id.to_string(),
            access_token_hash: tokens.access_token_hash,
            refresh_token_hash: tokens.refresh_token_hash,
            access_expires_at: tokens.access_expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
            device_info: client.device_info.clone(),
            ip_address: client.ip_address.clone(),
        };
        self.sessions.create(&new_session).await?;

        tracing::info!(user_id, %session_id, "Session opened");
        Ok(pair)
    }

    /// Exchange a refresh token for a new pair bound to the same session.
    ///
    /// The presented refresh token is permanently unusable afterwards.
    pub async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, CoreError> {
        let presented_hash = digest_token(refresh_token);

        let session = self
            .sessions
            .find_by_refresh_digest(&presented_hash)
            .await?
            .ok_or_else(|| CoreError::TokenExpired("Invalid or expired refresh token".into()))?;

        let now = Utc::now();
        if session.refresh_expired_at(now) {
            return Err(CoreError::TokenExpired("Refresh token expired".into()));
        }

        let (pair, tokens) = self.mint(&session.user_id, session.session_id, now)?;

        let swapped = self
            .sessions
            .rotate(session.session_id, &presented_hash, &tokens)
            .await?;
        if !swapped {
            tracing::warn!(
                session_id = %session.session_id,
                "Refresh token was rotated concurrently; rejecting the stale copy"
            );
            return Err(CoreError::TokenExpired(
                "Refresh token has already been used".into(),
            ));
        }

        tracing::info!(user_id = %session.user_id, session_id = %session.session_id, "Session rotated");
        Ok(pair)
    }

    /// Delete the caller's current session. Other sessions of the same user
    /// are untouched. Deleting an already-missing session is not an error.
    pub async fn revoke(&self, identity: &SessionIdentity) -> Result<(), CoreError> {
        let deleted = self
            .sessions
            .delete_by_session_id_and_owner(identity.session_id, &identity.user_id)
            .await?;

        if deleted {
            tracing::info!(user_id = %identity.user_id, session_id = %identity.session_id, "Session revoked");
        } else {
            tracing::debug!(session_id = %identity.session_id, "Logout for a session that no longer exists");
        }
        Ok(())
    }

    /// Describe the verified caller. No store access.
    pub fn identify(&self, identity: &SessionIdentity) -> UserInfo {
        UserInfo {
            id: identity.user_id.clone(),
        }
    }

    /// Sign an access token, draw a refresh token, and compute both expiries from `now`.
    fn mint(
        &self,
        user_id: &str,
        session_id: SessionId,
        now: Timestamp,
    ) -> Result<(TokenPair, SessionTokens), CoreError> {
        let access_token = self
            .codec
            .issue_access_token(user_id, session_id, now)
            .map_err(|e| CoreError::Internal(format!("Token generation error: {e}")))?;
        let refresh_token = random_token(REFRESH_TOKEN_LENGTH);

        let tokens = SessionTokens {
            access_token_hash: digest_token(&access_token),
            refresh_token_hash: digest_token(&refresh_token),
            access_expires_at: now + self.codec.access_ttl(),
            refresh_expires_at: now + self.config.refresh_expiry.duration(),
        };
        let pair = TokenPair {
            access_token,
            refresh_token,
            access_token_expiry: self.config.access_expiry.label().to_string(),
        };
        Ok((pair, tokens))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use filegate_core::expiry::Expiry;
    use filegate_core::store::MemoryStore;

    use super::SessionLifecycle;
    use crate::auth::jwt::{JwtConfig, TokenCodec};

    pub fn jwt_config() -> JwtConfig {
        JwtConfig {
            access_secret: "unit-test-access-secret-0123456789abcdef".to_string(),
            refresh_secret: "unit-test-refresh-secret-0123456789abcdef".to_string(),
            access_expiry: Expiry::access_default(),
            refresh_expiry: Expiry::refresh_default(),
        }
    }

    /// A lifecycle over a fresh in-memory store, plus the store for inspection.
    pub fn lifecycle() -> (SessionLifecycle, Arc<MemoryStore>, TokenCodec) {
        let store = Arc::new(MemoryStore::new());
        let config = jwt_config();
        let codec = TokenCodec::from_config(&config);
        let lifecycle = SessionLifecycle::new(store.clone(), store.clone(), codec.clone(), config);
        (lifecycle, store, codec)
    }
}
