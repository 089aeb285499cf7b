//! The canonical user record.

use crate::error::{DirectoryError, DirectoryResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uniqdb_store::{Item, Key, KeySchema};

/// Attribute holding the user id (primary key of the users table).
pub const ATTR_ID: &str = "id";
/// Attribute holding the user's email.
pub const ATTR_EMAIL: &str = "email";
/// Attribute holding the user's username.
pub const ATTR_USERNAME: &str = "username";

/// The canonical user record: one per id.
///
/// The id is immutable for the lifetime of the record; email and username
/// are mutable and each globally unique across live records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Primary key, immutable.
    pub id: String,
    /// Unique across all live records.
    pub email: String,
    /// Unique across all live records.
    pub username: String,
}

impl UserRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(id: impl Into<String>, email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            username: username.into(),
        }
    }

    /// The key schema of the users table.
    #[must_use]
    pub fn key_schema() -> KeySchema {
        KeySchema::hash(ATTR_ID)
    }

    /// Returns the primary key for a given user id.
    #[must_use]
    pub fn key_of(id: &str) -> Key {
        [(ATTR_ID.to_string(), json!(id))].into_iter().collect()
    }

    /// Returns this record's primary key.
    #[must_use]
    pub fn key(&self) -> Key {
        Self::key_of(&self.id)
    }

    /// Converts this record into a stored item.
    #[must_use]
    pub fn to_item(&self) -> Item {
        [
            (ATTR_ID.to_string(), json!(self.id)),
            (ATTR_EMAIL.to_string(), json!(self.email)),
            (ATTR_USERNAME.to_string(), json!(self.username)),
        ]
        .into_iter()
        .collect()
    }

    /// Decodes a stored item into a record.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::MalformedRecord`] if any attribute is
    /// missing or not a string.
    pub fn from_item(item: Item) -> DirectoryResult<Self> {
        let value = Value::Object(item.into_iter().collect());
        serde_json::from_value(value)
            .map_err(|err| DirectoryError::malformed_record(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_roundtrip() {
        let record = UserRecord::new("u1", "a@x.com", "alice");
        let decoded = UserRecord::from_item(record.to_item()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn from_item_rejects_missing_attribute() {
        let mut item = UserRecord::new("u1", "a@x.com", "alice").to_item();
        item.remove(ATTR_EMAIL);
        assert!(matches!(
            UserRecord::from_item(item),
            Err(DirectoryError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn key_contains_only_the_id() {
        let key = UserRecord::new("u1", "a@x.com", "alice").key();
        assert_eq!(key.len(), 1);
        assert_eq!(key[ATTR_ID], serde_json::json!("u1"));
    }
}
