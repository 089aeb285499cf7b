//! Table store trait definition.

use crate::directive::WriteDirective;
use crate::error::StoreResult;
use crate::item::{Item, Key};
use crate::schema::KeySchema;

/// A schemaless table store with conditional writes and multi-item atomic
/// transactions.
///
/// This is the seam UniqDB's coordinator is written against. The store does
/// not provide secondary indexes or a query layer; uniqueness enforcement is
/// built on top of the guarantees below.
///
/// # Invariants
///
/// - `transact` applies every directive or none: after an error, the store
///   is exactly as it was before the call
/// - Guards are evaluated against pre-transaction state, with isolation
///   from concurrently committing transactions touching the same keys
/// - Concurrent transactions over disjoint key sets proceed independently
/// - `get` and `scan` are non-transactional reads of committed state
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - reference implementation for tests, benches,
///   and the demo
pub trait TableStore: Send + Sync {
    /// Reads the item with the given key, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist or the key does not
    /// cover the table's key schema.
    fn get(&self, table: &str, key: &Key) -> StoreResult<Option<Item>>;

    /// Returns every item in the table.
    ///
    /// No pagination contract is assumed; callers are presentation layers
    /// and tests reading small tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist.
    fn scan(&self, table: &str) -> StoreResult<Vec<Item>>;

    /// Atomically applies a list of conditional directives.
    ///
    /// Either every directive is applied, or none is. Guards are checked
    /// against the state the store had before the transaction.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ConditionFailed`] if any guard does not hold; the
    ///   store is left untouched
    /// - [`StoreError::DuplicateItemInTransaction`] if two directives name
    ///   the same item
    /// - [`StoreError::InvalidTransaction`] if the directive list is empty
    /// - Table and key-schema errors as for [`TableStore::get`]
    ///
    /// [`StoreError::ConditionFailed`]: crate::StoreError::ConditionFailed
    /// [`StoreError::DuplicateItemInTransaction`]: crate::StoreError::DuplicateItemInTransaction
    /// [`StoreError::InvalidTransaction`]: crate::StoreError::InvalidTransaction
    fn transact(&self, directives: Vec<WriteDirective>) -> StoreResult<()>;

    /// Returns the primary key layout of a table.
    ///
    /// Consumed by presentation layers to order and annotate key attributes;
    /// the coordinator itself does not need it.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist.
    fn key_schema(&self, table: &str) -> StoreResult<KeySchema>;
}
