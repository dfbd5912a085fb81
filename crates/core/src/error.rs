use std::fmt;

use crate::store::StoreError;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Request field name as the client sent it (e.g. `"id"`, `"refreshToken"`).
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Domain error taxonomy shared by the lifecycle, the guard, and the HTTP layer.
///
/// Every variant except [`CoreError::Internal`] is an expected, operational
/// rejection whose message is safe to show to the caller.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Every failing field of one request.
    #[error("Validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("User with this id already exists")]
    UserExists,

    /// Deliberately identical for an unknown id and a wrong password.
    #[error("Invalid id or password")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Token expired: {0}")]
    TokenExpired(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Internal(err.to_string())
    }
}

impl From<FieldError> for CoreError {
    fn from(err: FieldError) -> Self {
        CoreError::Validation(vec![err])
    }
}
