//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent catalog and record violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("course not found: {0}")]
    CourseNotFound(String),

    #[error("stale course handle: node was already removed")]
    StaleHandle,

    #[error("malformed course line {line:?}: {reason}")]
    MalformedLine { line: String, reason: String },

    #[error("catalog tree corrupted: {0}")]
    Corrupt(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
