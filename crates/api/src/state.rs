use std::sync::Arc;

use filegate_core::store::{SessionStore, UserStore};

use crate::auth::guard::AuthGuard;
use crate::auth::jwt::TokenCodec;
use crate::auth::lifecycle::SessionLifecycle;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Session store, also used directly by the health check and the sweep.
    pub sessions: Arc<dyn SessionStore>,
    pub lifecycle: Arc<SessionLifecycle>,
    pub guard: Arc<AuthGuard>,
}

impl AppState {
    /// Wire the lifecycle and guard over the given stores. One [`TokenCodec`]
    /// is shared by both, so tokens minted here verify here.
    pub fn new(
        config: ServerConfig,
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let codec = TokenCodec::from_config(&config.jwt);
        let lifecycle = SessionLifecycle::new(
            users,
            Arc::clone(&sessions),
            codec.clone(),
            config.jwt.clone(),
        );
        let guard = AuthGuard::new(codec, Arc::clone(&sessions));

        Self {
            config: Arc::new(config),
            sessions,
            lifecycle: Arc::new(lifecycle),
            guard: Arc::new(guard),
        }
    }
}
