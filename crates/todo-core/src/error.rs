//! Unified error handling for todo-core

use thiserror::Error;

/// Core error type for todo-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Username already taken: {0}")]
    DuplicateIdentity(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for todo-core
pub type Result<T> = std::result::Result<T, Error>;

/// Stable external status for an error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    BadRequest,
    Unauthorized,
    NotFound,
    Conflict,
    Internal,
}

impl Status {
    /// Numeric code in the HTTP status space
    pub fn code(self) -> u16 {
        match self {
            Status::BadRequest => 400,
            Status::Unauthorized => 401,
            Status::NotFound => 404,
            Status::Conflict => 409,
            Status::Internal => 500,
        }
    }
}

impl Error {
    /// Create a malformed token error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::Malformed(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// External status for this error kind.
    pub fn status(&self) -> Status {
        match self {
            Error::DuplicateIdentity(_) => Status::Conflict,
            Error::InvalidCredentials
            | Error::InvalidSignature
            | Error::Expired
            | Error::Malformed(_) => Status::Unauthorized,
            Error::NotFound(_) => Status::NotFound,
            Error::Persistence(_) | Error::Io(_) | Error::Config(_) | Error::Internal(_) => {
                Status::Internal
            }
        }
    }

    /// Message safe to show outside the process. Never includes store or codec detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            Error::DuplicateIdentity(_) => "username already taken",
            Error::InvalidCredentials => "invalid username or password",
            Error::InvalidSignature | Error::Malformed(_) => "invalid token",
            Error::Expired => "token expired",
            Error::NotFound(_) => "not found",
            Error::Persistence(_) | Error::Io(_) | Error::Config(_) | Error::Internal(_) => {
                "internal error"
            }
        }
    }
}

/// Reclassify a store error raised while inserting a user.
pub(crate) fn classify_user_insert(err: sqlx::Error, username: &str) -> Error {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => {
            Error::DuplicateIdentity(username.to_string())
        }
        _ => Error::Persistence(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("list 7");
        assert_eq!(err.to_string(), "Not found: list 7");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::DuplicateIdentity("alice".into()).status().code(), 409);
        assert_eq!(Error::InvalidCredentials.status().code(), 401);
        assert_eq!(Error::Expired.status(), Status::Unauthorized);
        assert_eq!(Error::malformed("bad").status(), Status::Unauthorized);
        assert_eq!(Error::not_found("item 1").status().code(), 404);
        assert_eq!(Error::Persistence(sqlx::Error::RowNotFound).status().code(), 500);
    }

    #[test]
    fn test_public_message_hides_detail() {
        let err = Error::Persistence(sqlx::Error::Protocol("disk I/O error at page 4".into()));
        assert_eq!(err.public_message(), "internal error");

        let err = Error::not_found("list 42 for user 3");
        assert_eq!(err.public_message(), "not found");
    }

    #[test]
    fn test_classify_non_database_error() {
        let err = classify_user_insert(sqlx::Error::PoolTimedOut, "alice");
        assert!(matches!(err, Error::Persistence(_)));
    }
}
