//! Error types for directory operations.

use thiserror::Error;
use uniqdb_store::StoreError;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors that can occur during directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A guard inside the operation's transaction failed: the target value
    /// is already claimed, a row unexpectedly exists or does not exist, or
    /// a stale field was observed. The whole transaction was rejected and
    /// no partial mutation occurred.
    #[error("constraint violation: {message}")]
    ConstraintViolation {
        /// Which guard was rejected.
        message: String,
    },

    /// No record exists for the given user id.
    #[error("user not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A required argument was empty.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending argument.
        field: &'static str,
    },

    /// A required configuration value was not set.
    #[error("missing environment variable {name}")]
    MissingConfig {
        /// Name of the absent environment variable.
        name: String,
    },

    /// A stored item could not be decoded as a user record or index entry.
    #[error("malformed record: {message}")]
    MalformedRecord {
        /// Description of the decoding failure.
        message: String,
    },

    /// Transport or availability error from the store, passed through
    /// unmodified.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl DirectoryError {
    /// Creates a constraint-violation error.
    pub fn constraint_violation(message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a malformed-record error.
    pub fn malformed_record(message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            message: message.into(),
        }
    }
}
