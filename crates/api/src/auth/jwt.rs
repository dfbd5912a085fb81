//! JWT access-token issuance and verification.
//!
//! Access tokens are HS256-signed JWTs carrying `(userId, sessionId, type)`.
//! Verification here is signature and `exp` only; whether the referenced
//! session is still alive is the guard's job (see [`crate::auth::guard`]).

use std::fmt;

use chrono::Duration;
use filegate_core::expiry::Expiry;
use filegate_core::types::{SessionId, Timestamp, UserId};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value of the `type` claim on access tokens.
pub const ACCESS_TOKEN_TYPE: &str = "access";

/// Minimum length for both signing secrets.
pub const MIN_SECRET_LENGTH: usize = 32;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    #[serde(rename = "type")]
    pub token_type: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Per-token nonce so two tokens minted in the same second differ.
    pub jti: String,
}

/// Token secrets and lifetimes.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify access tokens.
    pub access_secret: String,
    /// Separate refresh-context secret. Must differ from `access_secret`.
    pub refresh_secret: String,
    /// Access token lifetime (default: `10m`).
    pub access_expiry: Expiry,
    /// Refresh token lifetime (default: `7d`).
    pub refresh_expiry: Expiry,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_expiry", &self.access_expiry.label())
            .field("refresh_expiry", &self.refresh_expiry.label())
            .finish()
    }
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var              | Required | Default |
    /// |----------------------|----------|---------|
    /// | `JWT_ACCESS_SECRET`  | **yes**  | --      |
    /// | `JWT_REFRESH_SECRET` | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY`  | no       | `10m`   |
    /// | `JWT_REFRESH_EXPIRY` | no       | `7d`    |
    ///
    /// Malformed expiry strings fall back to their defaults.
    ///
    /// # Panics
    ///
    /// Panics if either secret is missing or fails [`JwtConfig::validate`].
    pub fn from_env() -> Self {
        let access_secret = std::env::var("JWT_ACCESS_SECRET")
            .expect("JWT_ACCESS_SECRET must be set in the environment");
        let refresh_secret = std::env::var("JWT_REFRESH_SECRET")
            .expect("JWT_REFRESH_SECRET must be set in the environment");

        let access_expiry = match std::env::var("JWT_ACCESS_EXPIRY") {
            Ok(raw) => Expiry::parse_or(&raw, Expiry::access_default()),
            Err(_) => Expiry::access_default(),
        };
        let refresh_expiry = match std::env::var("JWT_REFRESH_EXPIRY") {
            Ok(raw) => Expiry::parse_or(&raw, Expiry::refresh_default()),
            Err(_) => Expiry::refresh_default(),
        };

        let config = Self {
            access_secret,
            refresh_secret,
            access_expiry,
            refresh_expiry,
        };
        if let Err(msg) = config.validate() {
            panic!("{msg}");
        }
        config
    }

    /// Check secret length and that the two secrets differ.
    pub fn validate(&self) -> Result<(), String> {
        if self.access_secret.chars().count() < MIN_SECRET_LENGTH {
            return Err(format!(
                "JWT_ACCESS_SECRET must be at least {MIN_SECRET_LENGTH} characters"
            ));
        }
        if self.refresh_secret.chars().count() < MIN_SECRET_LENGTH {
            return Err(format!(
                "JWT_REFRESH_SECRET must be at least {MIN_SECRET_LENGTH} characters"
            ));
        }
        if self.access_secret == self.refresh_secret {
            return Err("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ".to_string());
        }
        Ok(())
    }
}

/// Why an access token could not be issued or accepted.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    /// Bad signature, malformed token, or wrong `type` claim.
    #[error("invalid token")]
    Invalid,

    #[error("token encoding failed: {0}")]
    Encoding(jsonwebtoken::errors::Error),
}

/// Signs and verifies access tokens with a single process-wide secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, access_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(), // HS256, validates exp
            access_ttl,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(&config.access_secret, config.access_expiry.duration())
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Sign an access token for `session_id`, expiring `access_ttl` after `issued_at`.
    ///
    /// Callers store `issued_at + access_ttl` as the session's access expiry so
    /// the signed `exp` and the stored value agree.
    pub fn issue_access_token(
        &self,
        user_id: &str,
        session_id: SessionId,
        issued_at: Timestamp,
    ) -> Result<String, TokenError> {
        let iat = issued_at.timestamp();
        let claims = Claims {
            user_id: user_id.to_string(),
            session_id,
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            exp: (issued_at + self.access_ttl).timestamp(),
            iat,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::Encoding)
    }

    /// Verify signature and expiry, returning the embedded [`Claims`].
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        if data.claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(TokenError::Invalid);
        }
        Ok(data.claims)
    }
}
