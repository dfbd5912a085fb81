//! Input validation for credentials and refresh tokens.
//!
//! Callers pass already-trimmed values; every check here is on the exact
//! string that will be stored or looked up.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoreError, FieldError};

/// Maximum length of a user id in characters.
pub const MAX_USER_ID_LENGTH: usize = 255;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length in characters.
pub const MAX_PASSWORD_LENGTH: usize = 100;

/// Minimum accepted refresh token length in characters.
pub const MIN_REFRESH_TOKEN_LENGTH: usize = 64;

/// Maximum accepted refresh token length in characters.
pub const MAX_REFRESH_TOKEN_LENGTH: usize = 256;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// E.164: a `+`, a non-zero country digit, and at most 15 digits in total.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("valid regex"));

/// Validate a user id: non-empty, bounded, and either an email or an E.164 phone.
pub fn validate_user_id(id: &str) -> Result<(), FieldError> {
    if id.is_empty() {
        return Err(FieldError::new("id", "id is required"));
    }
    if id.chars().count() > MAX_USER_ID_LENGTH {
        return Err(FieldError::new(
            "id",
            format!("id must be at most {MAX_USER_ID_LENGTH} characters"),
        ));
    }
    if !EMAIL_RE.is_match(id) && !PHONE_RE.is_match(id) {
        return Err(FieldError::new(
            "id",
            "id must be a valid email or phone number",
        ));
    }
    Ok(())
}

/// Validate a password's length.
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    if password.is_empty() {
        return Err(FieldError::new("password", "password is required"));
    }
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(FieldError::new(
            "password",
            format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(FieldError::new(
            "password",
            format!("password must be at most {MAX_PASSWORD_LENGTH} characters"),
        ));
    }
    Ok(())
}

/// Validate the shape of a presented refresh token.
pub fn validate_refresh_token(token: &str) -> Result<(), FieldError> {
    if token.is_empty() {
        return Err(FieldError::new("refreshToken", "refreshToken is required"));
    }
    let len = token.chars().count();
    if !(MIN_REFRESH_TOKEN_LENGTH..=MAX_REFRESH_TOKEN_LENGTH).contains(&len) {
        return Err(FieldError::new(
            "refreshToken",
            "refreshToken has an invalid format",
        ));
    }
    Ok(())
}

/// Run field checks and report every failure at once.
pub fn check_all<I>(checks: I) -> Result<(), CoreError>
where
    I: IntoIterator<Item = Result<(), FieldError>>,
{
    let errors: Vec<FieldError> = checks.into_iter().filter_map(Result::err).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(errors))
    }
}
