//! Error types for table store operations.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named table does not exist.
    #[error("table not found: {table}")]
    TableNotFound {
        /// Name of the missing table.
        table: String,
    },

    /// A table with this name already exists.
    #[error("table already exists: {table}")]
    TableExists {
        /// Name of the existing table.
        table: String,
    },

    /// An item or key is missing an attribute required by the key schema.
    #[error("missing key attribute {attribute:?} for table {table}")]
    MissingKeyAttribute {
        /// Table whose key schema was violated.
        table: String,
        /// The absent key attribute.
        attribute: String,
    },

    /// A guard inside a transaction did not hold; the whole transaction
    /// was rejected and no mutation was applied.
    #[error("condition failed on directive {index}")]
    ConditionFailed {
        /// Zero-based position of the failing directive.
        index: usize,
    },

    /// A transaction named the same item more than once.
    #[error("transaction names item {key} in table {table} more than once")]
    DuplicateItemInTransaction {
        /// Table of the duplicated item.
        table: String,
        /// Canonical encoding of the duplicated key.
        key: String,
    },

    /// The transaction request itself was malformed.
    #[error("invalid transaction: {message}")]
    InvalidTransaction {
        /// Description of the problem.
        message: String,
    },
}

impl StoreError {
    /// Creates a table-not-found error.
    pub fn table_not_found(table: impl Into<String>) -> Self {
        Self::TableNotFound {
            table: table.into(),
        }
    }

    /// Creates an invalid-transaction error.
    pub fn invalid_transaction(message: impl Into<String>) -> Self {
        Self::InvalidTransaction {
            message: message.into(),
        }
    }
}
