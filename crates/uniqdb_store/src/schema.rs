//! Table key schemas.

use crate::item::{Item, Key};

/// The role an attribute plays in a table's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    /// Hash (partition) key attribute.
    Hash,
    /// Range (sort) key attribute.
    Range,
}

/// The primary key layout of a table: a hash attribute and an optional
/// range attribute.
///
/// Two items are the same row exactly when all key attributes are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    hash: String,
    range: Option<String>,
}

impl KeySchema {
    /// Creates a schema keyed by a single hash attribute.
    #[must_use]
    pub fn hash(attribute: impl Into<String>) -> Self {
        Self {
            hash: attribute.into(),
            range: None,
        }
    }

    /// Creates a schema keyed by a hash attribute and a range attribute.
    #[must_use]
    pub fn hash_and_range(hash: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            range: Some(range.into()),
        }
    }

    /// Returns the hash key attribute name.
    #[must_use]
    pub fn hash_attribute(&self) -> &str {
        &self.hash
    }

    /// Returns the range key attribute name, if the table has one.
    #[must_use]
    pub fn range_attribute(&self) -> Option<&str> {
        self.range.as_deref()
    }

    /// Returns the key attribute names, hash first.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.hash.as_str()).chain(self.range.as_deref())
    }

    /// Returns the role of `attribute` in this schema, if any.
    #[must_use]
    pub fn role_of(&self, attribute: &str) -> Option<KeyRole> {
        if attribute == self.hash {
            Some(KeyRole::Hash)
        } else if self.range.as_deref() == Some(attribute) {
            Some(KeyRole::Range)
        } else {
            None
        }
    }

    /// Extracts the primary key from an attribute map.
    ///
    /// Returns `None` if any key attribute is absent. Non-key attributes
    /// are ignored, so this also normalizes an over-specified key.
    #[must_use]
    pub fn key_of(&self, attributes: &Item) -> Option<Key> {
        let mut key = Key::new();
        for name in self.attributes() {
            let value = attributes.get(name)?;
            key.insert(name.to_string(), value.clone());
        }
        Some(key)
    }

    /// Returns the first key attribute absent from `attributes`, if any.
    #[must_use]
    pub fn missing_attribute(&self, attributes: &Item) -> Option<&str> {
        self.attributes()
            .find(|name| !attributes.contains_key(*name))
    }
}
