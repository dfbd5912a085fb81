//! Authentication primitives and the session lifecycle.
//!
//! - [`jwt`] -- access-token signing/verification and token configuration.
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`lifecycle`] -- signup/signin issuance, refresh rotation, logout revocation.
//! - [`guard`] -- per-request access-token and session validation.

pub mod guard;
pub mod jwt;
pub mod lifecycle;
pub mod password;
