//! Session-backed authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use filegate_core::error::CoreError;
use filegate_core::session::SessionIdentity;
use filegate_core::types::{SessionId, UserId};

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from an `Authorization: Bearer <token>` header.
///
/// Extraction runs the full [`AuthGuard`](crate::auth::guard::AuthGuard)
/// check, so a handler taking `AuthUser` only runs for a live session:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, session_id = %user.session_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    /// The session the presented access token is bound to.
    pub session_id: SessionId,
}

impl AuthUser {
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            user_id: self.user_id.clone(),
            session_id: self.session_id,
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("No token provided".into())))?;

        let identity = state.guard.authenticate(token).await?;

        Ok(AuthUser {
            user_id: identity.user_id,
            session_id: identity.session_id,
        })
    }
}
