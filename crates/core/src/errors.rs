//! Core error types for SchoolFeed.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type.
///
/// Domain variants map one-to-one onto the stable error codes exposed to
/// callers (see [`Error::code`]). Database-specific errors are wrapped in
/// string form to keep this type database-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Only teachers can create a school")]
    SchoolCreateTeacherOnly,

    #[error("School not found: {0}")]
    SchoolNotFound(String),

    #[error("User {user_id} is not a member of school {school_id}")]
    SchoolMemberNotFound { user_id: String, school_id: String },

    #[error("School member {0} is not allowed to write news")]
    SchoolPermissionCheck(String),

    #[error("School news not found: {0}")]
    SchoolNewsNotFound(String),

    #[error("User {user_id} already joined school {school_id}")]
    AlreadyJoined { user_id: String, school_id: String },

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Failed to publish domain event '{event}': {reason}")]
    EventPublish { event: &'static str, reason: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Stable error code shared with API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Error::UserNotFound(_) => "USER_NOT_FOUND",
            Error::SchoolCreateTeacherOnly => "SCHOOL_CREATE_TEACHER_ONLY",
            Error::SchoolNotFound(_) => "SCHOOL_NOT_FOUND",
            Error::SchoolMemberNotFound { .. } => "SCHOOL_MEMBER_NOT_FOUND",
            Error::SchoolPermissionCheck(_) => "SCHOOL_PERMISSION_CHECK",
            Error::SchoolNewsNotFound(_) => "SCHOOL_NEWS_NOT_FOUND",
            Error::AlreadyJoined { .. } => "ALREADY_JOINED",
            Error::MemberNotFound(_) => "MEMBER_NOT_FOUND",
            Error::Validation(_) => "INVALID_PARAMETER",
            Error::Database(_) | Error::EventPublish { .. } | Error::Unexpected(_) => {
                "INTERNAL_SERVER_ERROR"
            }
        }
    }

    /// Returns true for errors that indicate a missing or deleted entity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::UserNotFound(_)
                | Error::SchoolNotFound(_)
                | Error::SchoolMemberNotFound { .. }
                | Error::SchoolNewsNotFound(_)
                | Error::MemberNotFound(_)
                | Error::Database(DatabaseError::NotFound(_))
        )
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Field '{field}' must be between {min} and {max} characters")]
    LengthOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

/// Checks that a text field's character count is within `min..=max`.
pub fn validate_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> std::result::Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len < min || value.chars().count() > max {
        return Err(ValidationError::LengthOutOfRange { field, min, max });
    }
    Ok(())
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
