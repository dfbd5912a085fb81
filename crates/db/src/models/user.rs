//! User row model.

use filegate_core::types::Timestamp;
use filegate_core::user::User;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}
