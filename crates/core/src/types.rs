/// Users are keyed by their login identifier (an email or an E.164 phone number).
pub type UserId = String;

/// Sessions are keyed by a random UUID allocated before the first token is signed.
pub type SessionId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
