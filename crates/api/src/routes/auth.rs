//! Route definitions for the session endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// POST /signup            -> signup
/// POST /signin            -> signin
/// POST /signin/new_token  -> new_token
/// GET  /logout            -> logout (requires auth)
/// GET  /info              -> info (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/signin/new_token", post(auth::new_token))
        .route("/logout", get(auth::logout))
        .route("/info", get(auth::info))
}
