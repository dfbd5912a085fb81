//! Domain layer for the filegate session service.
//!
//! Holds everything that does not depend on HTTP or SQL: the session and user
//! models, the error taxonomy, token digests, duration parsing, input
//! validation, and the storage capability traits the lifecycle runs against.

pub mod error;
pub mod expiry;
pub mod hashing;
pub mod session;
pub mod store;
pub mod types;
pub mod user;
pub mod validation;
