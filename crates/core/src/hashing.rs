//! Token digests and random refresh token generation.
//!
//! Raw tokens are never persisted. Sessions store the SHA-256 hex digest of
//! each token, and lookups hash the presented token the same way.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length (in hex characters) of a freshly generated refresh token.
pub const REFRESH_TOKEN_LENGTH: usize = 80;

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Digest an opaque token string for storage or lookup.
pub fn digest_token(token: &str) -> String {
    sha256_hex(token.as_bytes())
}

/// Generate a cryptographically random token of `length` lowercase hex characters.
pub fn random_token(length: usize) -> String {
    let mut bytes = vec![0u8; length.div_ceil(2)];
    rand::rng().fill(&mut bytes[..]);

    let mut token: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    token.truncate(length);
    token
}
