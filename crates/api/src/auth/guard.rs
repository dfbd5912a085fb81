//! Per-request access-token check.
//!
//! A signed, unexpired JWT is necessary but not sufficient: the session it
//! names must still exist, be active, belong to the token's user, and have a
//! stored access expiry in the future. Deleting the session row therefore
//! revokes every token bound to it immediately.

use std::sync::Arc;

use chrono::Utc;
use filegate_core::error::CoreError;
use filegate_core::session::SessionIdentity;
use filegate_core::store::SessionStore;

use crate::auth::jwt::{TokenCodec, TokenError};

pub struct AuthGuard {
    codec: TokenCodec,
    sessions: Arc<dyn SessionStore>,
}

impl AuthGuard {
    pub fn new(codec: TokenCodec, sessions: Arc<dyn SessionStore>) -> Self {
        Self { codec, sessions }
    }

    /// Verify `token` and the session it references. Read-only.
    pub async fn authenticate(&self, token: &str) -> Result<SessionIdentity, CoreError> {
        let claims = self.codec.verify_access_token(token).map_err(|e| match e {
            TokenError::Expired => CoreError::TokenExpired("Access token expired".into()),
            TokenError::Invalid | TokenError::Encoding(_) => {
                CoreError::Unauthorized("Invalid token".into())
            }
        })?;

        let session = self
            .sessions
            .find_by_session_id(claims.session_id)
            .await?
            .filter(|s| s.is_active)
            .ok_or_else(|| CoreError::Unauthorized("Session not found or inactive".into()))?;

        if session.user_id != claims.user_id {
            tracing::warn!(
                session_id = %session.session_id,
                "Access token user does not own the referenced session"
            );
            return Err(CoreError::Unauthorized("Invalid token".into()));
        }

        if session.access_expired_at(Utc::now()) {
            return Err(CoreError::TokenExpired("Access token expired".into()));
        }

        Ok(SessionIdentity {
            user_id: claims.user_id,
            session_id: claims.session_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Duration;
    use filegate_core::session::SessionTokens;
    use uuid::Uuid;

    use super::*;
    use crate::auth::lifecycle::testing::lifecycle;
    use crate::auth::lifecycle::ClientInfo;

    #[tokio::test]
    async fn fresh_token_authenticates() {
        let (lifecycle, store, codec) = lifecycle();
        let guard = AuthGuard::new(codec.clone(), store.clone());

        let pair = lifecycle
            .signup("a@b.com", "secret1", &ClientInfo::default())
            .await
            .unwrap();
        let identity = guard.authenticate(&pair.access_token).await.unwrap();

        assert_eq!(identity.user_id, "a@b.com");
        assert_eq!(identity.session_id, store.sessions_for("a@b.com").await[0].session_id);
    }

    #[tokio::test]
    async fn tampered_token_is_unauthorized() {
        let (lifecycle, store, codec) = lifecycle();
        let guard = AuthGuard::new(codec, store);

        let pair = lifecycle
            .signup("a@b.com", "secret1", &ClientInfo::default())
            .await
            .unwrap();
        let mut tampered = pair.access_token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert_matches!(
            guard.authenticate(&tampered).await,
            Err(CoreError::Unauthorized(_))
        );
        assert_matches!(
            guard.authenticate("not-a-token").await,
            Err(CoreError::Unauthorized(_))
        );
    }

    #[tokio::test]
    async fn valid_signature_for_unknown_session_is_unauthorized() {
        let (_, store, codec) = lifecycle();
        let guard = AuthGuard::new(codec.clone(), store);

        let token = codec
            .issue_access_token("a@b.com", Uuid::new_v4(), Utc::now())
            .unwrap();

        assert_matches!(
            guard.authenticate(&token).await,
            Err(CoreError::Unauthorized(msg)) if msg == "Session not found or inactive"
        );
    }

    #[tokio::test]
    async fn revoked_session_rejects_its_access_token() {
        let (lifecycle, store, codec) = lifecycle();
        let guard = AuthGuard::new(codec, store);

        let pair = lifecycle
            .signup("a@b.com", "secret1", &ClientInfo::default())
            .await
            .unwrap();
        let identity = guard.authenticate(&pair.access_token).await.unwrap();
        lifecycle.revoke(&identity).await.unwrap();

        assert_matches!(
            guard.authenticate(&pair.access_token).await,
            Err(CoreError::Unauthorized(_))
        );
    }

    #[tokio::test]
    async fn other_sessions_survive_a_logout() {
        let (lifecycle, store, codec) = lifecycle();
        let guard = AuthGuard::new(codec, store);

        let first = lifecycle
            .signup("a@b.com", "secret1", &ClientInfo::default())
            .await
            .unwrap();
        let second = lifecycle
            .signin("a@b.com", "secret1", &ClientInfo::default())
            .await
            .unwrap();

        let identity = guard.authenticate(&first.access_token).await.unwrap();
        lifecycle.revoke(&identity).await.unwrap();

        assert!(guard.authenticate(&second.access_token).await.is_ok());
    }

    #[tokio::test]
    async fn stored_expiry_wins_over_the_signed_one() {
        let (lifecycle, store, codec) = lifecycle();
        let guard = AuthGuard::new(codec, store.clone());

        let pair = lifecycle
            .signup("a@b.com", "secret1", &ClientInfo::default())
            .await
            .unwrap();
        let session = store.sessions_for("a@b.com").await.remove(0);

        let tokens = SessionTokens {
            access_token_hash: session.access_token_hash.clone(),
            refresh_token_hash: session.refresh_token_hash.clone(),
            access_expires_at: Utc::now() - Duration::seconds(1),
            refresh_expires_at: session.refresh_expires_at,
        };
        assert!(store.update(session.session_id, &tokens).await.unwrap());

        assert_matches!(
            guard.authenticate(&pair.access_token).await,
            Err(CoreError::TokenExpired(_))
        );
    }

    #[tokio::test]
    async fn token_for_someone_elses_session_is_unauthorized() {
        let (lifecycle, store, codec) = lifecycle();
        let guard = AuthGuard::new(codec.clone(), store.clone());

        lifecycle
            .signup("a@b.com", "secret1", &ClientInfo::default())
            .await
            .unwrap();
        let victim_session = store.sessions_for("a@b.com").await[0].session_id;

        let forged = codec
            .issue_access_token("mallory@b.com", victim_session, Utc::now())
            .unwrap();

        assert_matches!(
            guard.authenticate(&forged).await,
            Err(CoreError::Unauthorized(_))
        );
    }

    #[tokio::test]
    async fn signed_expiry_is_enforced() {
        let (_, store, codec) = lifecycle();
        let guard = AuthGuard::new(codec.clone(), store);

        let token = codec
            .issue_access_token("a@b.com", Uuid::new_v4(), Utc::now() - Duration::hours(1))
            .unwrap();

        assert_matches!(
            guard.authenticate(&token).await,
            Err(CoreError::TokenExpired(_))
        );
    }
}
