//! Session model: one row per authenticated device or client.
//!
//! A session binds the validity window of a token pair to a single login.
//! Only digests of the tokens are kept; the raw strings exist solely in the
//! issue/rotate response handed back to the client.

use crate::types::{SessionId, Timestamp, UserId};

/// A persisted session row.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub access_token_hash: String,
    pub refresh_token_hash: String,
    pub access_expires_at: Timestamp,
    pub refresh_expires_at: Timestamp,
    pub is_active: bool,
    /// Advisory only (usually the `User-Agent` header).
    pub device_info: Option<String>,
    /// Advisory only.
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
    pub last_activity: Timestamp,
}

impl Session {
    /// Whether the stored access expiry has passed at `now`.
    pub fn access_expired_at(&self, now: Timestamp) -> bool {
        now > self.access_expires_at
    }

    /// Whether the stored refresh expiry has passed at `now`.
    pub fn refresh_expired_at(&self, now: Timestamp) -> bool {
        now > self.refresh_expires_at
    }
}

/// Input for inserting a session. The id is allocated by the caller so the
/// first access token can embed it before the row exists.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub access_token_hash: String,
    pub refresh_token_hash: String,
    pub access_expires_at: Timestamp,
    pub refresh_expires_at: Timestamp,
    pub device_info: Option<String>,
    pub ip_address: Option<String>,
}

/// Replacement token digests and expiries written on rotation.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token_hash: String,
    pub refresh_token_hash: String,
    pub access_expires_at: Timestamp,
    pub refresh_expires_at: Timestamp,
}

/// The identity carried by a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: UserId,
    pub session_id: SessionId,
}
