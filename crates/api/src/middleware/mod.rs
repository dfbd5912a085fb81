//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Verifies the Bearer access token and its session.

pub mod auth;
