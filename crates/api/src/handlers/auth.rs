//! Handlers for signup, signin, token refresh, logout, and caller info.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use filegate_core::validation::{
    check_all, validate_password, validate_refresh_token, validate_user_id,
};
use serde::{Deserialize, Serialize};

use crate::auth::lifecycle::{ClientInfo, TokenPair, UserInfo};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /signup` and `POST /signin`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub id: String,
    pub password: String,
}

/// Request body for `POST /signin/new_token`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /signup
///
/// Register a new user and open their first session.
pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<TokenPair>)> {
    let (id, password) = credentials(payload)?;

    let pair = state
        .lifecycle
        .signup(&id, &password, &client_info(&headers))
        .await?;

    Ok((StatusCode::CREATED, Json(pair)))
}

/// POST /signin
///
/// Authenticate with id + password. Each call opens an additional session.
pub async fn signin(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AppResult<Json<TokenPair>> {
    let (id, password) = credentials(payload)?;

    let pair = state
        .lifecycle
        .signin(&id, &password, &client_info(&headers))
        .await?;

    Ok(Json(pair))
}

/// POST /signin/new_token
///
/// Exchange a refresh token for a new pair on the same session.
pub async fn new_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> AppResult<Json<TokenPair>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let refresh_token = input.refresh_token.trim();
    check_all([validate_refresh_token(refresh_token)])?;

    let pair = state.lifecycle.rotate(refresh_token).await?;
    Ok(Json(pair))
}

/// GET /logout
///
/// Revoke the caller's current session only.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<MessageResponse>> {
    state.lifecycle.revoke(&auth_user.identity()).await?;
    Ok(Json(MessageResponse {
        message: "Logged out successfully",
    }))
}

/// GET /info
pub async fn info(State(state): State<AppState>, auth_user: AuthUser) -> Json<UserInfo> {
    Json(state.lifecycle.identify(&auth_user.identity()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Unwrap, trim, and validate a credentials body.
fn credentials(
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AppResult<(String, String)> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let id = input.id.trim().to_string();
    let password = input.password.trim().to_string();
    check_all([validate_user_id(&id), validate_password(&password)])?;

    Ok((id, password))
}

/// Collect advisory client metadata from request headers.
///
/// The IP is the first `X-Forwarded-For` hop, falling back to `X-Real-IP`.
fn client_info(headers: &HeaderMap) -> ClientInfo {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let forwarded_for = header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    ClientInfo {
        device_info: header("user-agent").map(str::to_string),
        ip_address: forwarded_for.or_else(|| header("x-real-ip")).map(str::to_string),
    }
}
