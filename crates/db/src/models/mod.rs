//! Row structs for the `users` and `sessions` tables.
//!
//! Each row converts into its `filegate_core` domain type so nothing above
//! this crate depends on sqlx.

pub mod session;
pub mod user;
