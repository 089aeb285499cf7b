//! Uniqueness-index entries.
//!
//! The index table simulates the secondary unique constraint the store does
//! not provide natively: a row keyed by `(value, type)` exists if and only
//! if some live user record currently holds that value for that field.

use crate::error::{DirectoryError, DirectoryResult};
use serde_json::json;
use std::fmt;
use uniqdb_store::{Item, Key, KeySchema};

/// Attribute holding the claimed value (hash key of the index table).
pub const ATTR_VALUE: &str = "value";
/// Attribute holding the claim type (range key of the index table).
pub const ATTR_TYPE: &str = "type";

/// Which user field an index entry claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueKind {
    /// The entry claims an email address.
    Email,
    /// The entry claims a username.
    Username,
}

impl UniqueKind {
    /// Returns the stored representation of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Username => "username",
        }
    }
}

impl fmt::Display for UniqueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UniqueKind {
    type Error = DirectoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "email" => Ok(Self::Email),
            "username" => Ok(Self::Username),
            other => Err(DirectoryError::malformed_record(format!(
                "unknown unique kind: {other}"
            ))),
        }
    }
}

/// One claim in the uniqueness index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueEntry {
    /// The claimed value.
    pub value: String,
    /// Which field the value is claimed for.
    pub kind: UniqueKind,
}

impl UniqueEntry {
    /// Creates an entry claiming `value` for `kind`.
    #[must_use]
    pub fn new(kind: UniqueKind, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    /// Creates an email claim.
    #[must_use]
    pub fn email(value: impl Into<String>) -> Self {
        Self::new(UniqueKind::Email, value)
    }

    /// Creates a username claim.
    #[must_use]
    pub fn username(value: impl Into<String>) -> Self {
        Self::new(UniqueKind::Username, value)
    }

    /// The key schema of the uniqueness-index table.
    #[must_use]
    pub fn key_schema() -> KeySchema {
        KeySchema::hash_and_range(ATTR_VALUE, ATTR_TYPE)
    }

    /// Returns this entry's primary key.
    #[must_use]
    pub fn key(&self) -> Key {
        [
            (ATTR_VALUE.to_string(), json!(self.value)),
            (ATTR_TYPE.to_string(), json!(self.kind.as_str())),
        ]
        .into_iter()
        .collect()
    }

    /// Converts this entry into a stored item.
    ///
    /// Index rows carry nothing beyond their key attributes.
    #[must_use]
    pub fn to_item(&self) -> Item {
        self.key()
    }

    /// Decodes a stored item into an entry.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::MalformedRecord`] if either attribute is
    /// missing, not a string, or an unknown kind.
    pub fn from_item(item: &Item) -> DirectoryResult<Self> {
        let value = string_attr(item, ATTR_VALUE)?;
        let kind = UniqueKind::try_from(string_attr(item, ATTR_TYPE)?)?;
        Ok(Self::new(kind, value))
    }
}

fn string_attr<'a>(item: &'a Item, attribute: &str) -> DirectoryResult<&'a str> {
    item.get(attribute)
        .and_then(|value| value.as_str())
        .ok_or_else(|| {
            DirectoryError::malformed_record(format!("missing string attribute {attribute:?}"))
        })
}
