//! Session row model.

use filegate_core::session::Session;
use filegate_core::types::{SessionId, Timestamp};
use sqlx::FromRow;

/// A row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub session_id: SessionId,
    pub user_id: String,
    pub access_token_hash: String,
    pub refresh_token_hash: String,
    pub access_expires_at: Timestamp,
    pub refresh_expires_at: Timestamp,
    pub is_active: bool,
    pub device_info: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
    pub last_activity: Timestamp,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            session_id: row.session_id,
            user_id: row.user_id,
            access_token_hash: row.access_token_hash,
            refresh_token_hash: row.refresh_token_hash,
            access_expires_at: row.access_expires_at,
            refresh_expires_at: row.refresh_expires_at,
            is_active: row.is_active,
            device_info: row.device_info,
            ip_address: row.ip_address,
            created_at: row.created_at,
            last_activity: row.last_activity,
        }
    }
}
