//! User model.

use crate::types::{Timestamp, UserId};

/// A registered user.
///
/// Contains the password hash -- never serialize this to API responses.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// Input for creating a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub password_hash: String,
}
