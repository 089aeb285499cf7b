//! Conditional write directives.
//!
//! A transaction is a list of directives, each guarded by a predicate over
//! the current state of the item it targets. The store checks every guard
//! against pre-transaction state and applies either all directives or none.

use crate::item::{Item, Key};
use serde_json::Value;
use std::collections::BTreeMap;

/// A predicate over the current state of one item, checked at commit time.
///
/// If any guard in a transaction does not hold, the whole transaction is
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// The item must not exist.
    Absent,
    /// The item must exist.
    Exists,
    /// The item must exist and each named field must currently equal the
    /// given value. This is the optimistic concurrency check: compare a
    /// previously read value against what is stored now.
    FieldsEqual(BTreeMap<String, Value>),
}

impl Guard {
    /// Builds a [`Guard::FieldsEqual`] from field/value pairs.
    #[must_use]
    pub fn fields_equal<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Self::FieldsEqual(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    /// Evaluates this guard against the current state of the target item.
    #[must_use]
    pub fn holds(&self, current: Option<&Item>) -> bool {
        match self {
            Guard::Absent => current.is_none(),
            Guard::Exists => current.is_some(),
            Guard::FieldsEqual(fields) => match current {
                None => false,
                Some(item) => fields
                    .iter()
                    .all(|(name, expected)| item.get(name) == Some(expected)),
            },
        }
    }
}

/// One conditional operation inside a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteDirective {
    /// Writes a full item, replacing any existing row with the same key.
    Put {
        /// Target table.
        table: String,
        /// The item to write. Must contain all key attributes.
        item: Item,
        /// Optional guard; `None` writes unconditionally.
        guard: Option<Guard>,
    },
    /// Sets individual fields on an item, creating it if absent.
    Update {
        /// Target table.
        table: String,
        /// Key of the item to update.
        key: Key,
        /// Fields to set.
        set: BTreeMap<String, Value>,
        /// Optional guard; `None` updates unconditionally.
        guard: Option<Guard>,
    },
    /// Removes an item.
    Delete {
        /// Target table.
        table: String,
        /// Key of the item to remove.
        key: Key,
        /// Optional guard; `None` deletes unconditionally.
        guard: Option<Guard>,
    },
}

impl WriteDirective {
    /// Creates a put directive.
    #[must_use]
    pub fn put(table: impl Into<String>, item: Item, guard: Option<Guard>) -> Self {
        Self::Put {
            table: table.into(),
            item,
            guard,
        }
    }

    /// Creates an update directive.
    #[must_use]
    pub fn update(
        table: impl Into<String>,
        key: Key,
        set: BTreeMap<String, Value>,
        guard: Option<Guard>,
    ) -> Self {
        Self::Update {
            table: table.into(),
            key,
            set,
            guard,
        }
    }

    /// Creates a delete directive.
    #[must_use]
    pub fn delete(table: impl Into<String>, key: Key, guard: Option<Guard>) -> Self {
        Self::Delete {
            table: table.into(),
            key,
            guard,
        }
    }

    /// Returns the table this directive targets.
    #[must_use]
    pub fn table(&self) -> &str {
        match self {
            Self::Put { table, .. } | Self::Update { table, .. } | Self::Delete { table, .. } => {
                table
            }
        }
    }

    /// Returns this directive's guard, if any.
    #[must_use]
    pub fn guard(&self) -> Option<&Guard> {
        match self {
            Self::Put { guard, .. } | Self::Update { guard, .. } | Self::Delete { guard, .. } => {
                guard.as_ref()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(pairs: &[(&str, &str)]) -> Item {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    #[test]
    fn absent_guard() {
        assert!(Guard::Absent.holds(None));
        assert!(!Guard::Absent.holds(Some(&item(&[("id", "u1")]))));
    }

    #[test]
    fn exists_guard() {
        assert!(!Guard::Exists.holds(None));
        assert!(Guard::Exists.holds(Some(&item(&[("id", "u1")]))));
    }

    #[test]
    fn fields_equal_guard_matches_stored_values() {
        let stored = item(&[("id", "u1"), ("email", "a@x.com")]);
        let guard = Guard::fields_equal([("email", json!("a@x.com"))]);
        assert!(guard.holds(Some(&stored)));
    }

    #[test]
    fn fields_equal_guard_rejects_stale_value() {
        let stored = item(&[("id", "u1"), ("email", "b@x.com")]);
        let guard = Guard::fields_equal([("email", json!("a@x.com"))]);
        assert!(!guard.holds(Some(&stored)));
    }

    #[test]
    fn fields_equal_guard_rejects_absent_item() {
        let guard = Guard::fields_equal([("email", json!("a@x.com"))]);
        assert!(!guard.holds(None));
    }

    #[test]
    fn fields_equal_guard_rejects_missing_field() {
        let stored = item(&[("id", "u1")]);
        let guard = Guard::fields_equal([("email", json!("a@x.com"))]);
        assert!(!guard.holds(Some(&stored)));
    }

    #[test]
    fn directive_accessors() {
        let put = WriteDirective::put("users", item(&[("id", "u1")]), Some(Guard::Absent));
        assert_eq!(put.table(), "users");
        assert_eq!(put.guard(), Some(&Guard::Absent));

        let delete = WriteDirective::delete("users", item(&[("id", "u1")]), None);
        assert_eq!(delete.table(), "users");
        assert_eq!(delete.guard(), None);
    }
}
