//! In-memory table store.

use crate::backend::TableStore;
use crate::directive::{Guard, WriteDirective};
use crate::error::{StoreError, StoreResult};
use crate::item::{Item, Key};
use crate::schema::KeySchema;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// An in-memory table store.
///
/// This store holds all tables in memory and is suitable for:
/// - Unit and integration tests
/// - Benchmarks
/// - The demo CLI
///
/// # Thread Safety
///
/// All state sits behind a single `RwLock`; `transact` holds the write lock
/// across guard validation and application, which gives transactions the
/// atomicity and isolation the [`TableStore`] contract requires.
///
/// # Example
///
/// ```rust
/// use uniqdb_store::{InMemoryStore, Item, KeySchema, TableStore, WriteDirective};
/// use serde_json::json;
///
/// let store = InMemoryStore::new();
/// store.create_table("users", KeySchema::hash("id")).unwrap();
///
/// let item: Item = [("id".to_string(), json!("u1"))].into_iter().collect();
/// store.transact(vec![WriteDirective::put("users", item, None)]).unwrap();
///
/// let key: uniqdb_store::Key = [("id".to_string(), json!("u1"))].into_iter().collect();
/// assert!(store.get("users", &key).unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<BTreeMap<String, TableData>>,
}

#[derive(Debug)]
struct TableData {
    schema: KeySchema,
    /// Rows keyed by the canonical encoding of their primary key.
    rows: BTreeMap<String, Item>,
}

/// Encodes a normalized key into a canonical string.
///
/// The key is a `BTreeMap`, so attribute order is stable and equal keys
/// always encode identically.
fn encode_key(key: &Key) -> String {
    let mut out = String::new();
    for (name, value) in key {
        out.push_str(name);
        out.push('=');
        out.push_str(&value.to_string());
        out.push('\u{1f}');
    }
    out
}

/// One validated, ready-to-apply mutation.
enum Mutation {
    Put(Item),
    Update(Key, BTreeMap<String, Value>),
    Delete,
}

impl InMemoryStore {
    /// Creates a new store with no tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with the given key schema.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TableExists`] if the name is taken.
    pub fn create_table(&self, name: impl Into<String>, schema: KeySchema) -> StoreResult<()> {
        let name = name.into();
        let mut tables = self.tables.write();
        if tables.contains_key(&name) {
            return Err(StoreError::TableExists { table: name });
        }
        tables.insert(
            name,
            TableData {
                schema,
                rows: BTreeMap::new(),
            },
        );
        Ok(())
    }
}

impl TableStore for InMemoryStore {
    fn get(&self, table: &str, key: &Key) -> StoreResult<Option<Item>> {
        let tables = self.tables.read();
        let data = tables
            .get(table)
            .ok_or_else(|| StoreError::table_not_found(table))?;
        let key = normalize_key(&data.schema, key, table)?;
        Ok(data.rows.get(&encode_key(&key)).cloned())
    }

    fn scan(&self, table: &str) -> StoreResult<Vec<Item>> {
        let tables = self.tables.read();
        let data = tables
            .get(table)
            .ok_or_else(|| StoreError::table_not_found(table))?;
        Ok(data.rows.values().cloned().collect())
    }

    fn transact(&self, directives: Vec<WriteDirective>) -> StoreResult<()> {
        if directives.is_empty() {
            return Err(StoreError::invalid_transaction(
                "transaction contains no directives",
            ));
        }

        let mut tables = self.tables.write();

        // Phase one: resolve every directive and check every guard against
        // pre-transaction state. Nothing is mutated until all checks pass.
        let mut plan: Vec<(String, String, Mutation)> = Vec::with_capacity(directives.len());
        let mut touched: BTreeSet<(String, String)> = BTreeSet::new();

        for (index, directive) in directives.into_iter().enumerate() {
            let table = directive.table().to_string();
            let data = tables
                .get(&table)
                .ok_or_else(|| StoreError::table_not_found(&table))?;

            let (key, mutation) = match directive {
                WriteDirective::Put { item, guard, .. } => {
                    let key = normalize_key(&data.schema, &item, &table)?;
                    check_guard(guard.as_ref(), data, &key, index)?;
                    (key, Mutation::Put(item))
                }
                WriteDirective::Update {
                    key, set, guard, ..
                } => {
                    let key = normalize_key(&data.schema, &key, &table)?;
                    check_guard(guard.as_ref(), data, &key, index)?;
                    (key.clone(), Mutation::Update(key, set))
                }
                WriteDirective::Delete { key, guard, .. } => {
                    let key = normalize_key(&data.schema, &key, &table)?;
                    check_guard(guard.as_ref(), data, &key, index)?;
                    (key, Mutation::Delete)
                }
            };

            let encoded = encode_key(&key);
            if !touched.insert((table.clone(), encoded.clone())) {
                return Err(StoreError::DuplicateItemInTransaction {
                    table,
                    key: encoded,
                });
            }
            plan.push((table, encoded, mutation));
        }

        // Phase two: apply. The write lock has been held since validation,
        // so this cannot observe or produce intermediate states.
        for (table, encoded, mutation) in plan {
            let data = tables
                .get_mut(&table)
                .ok_or_else(|| StoreError::table_not_found(&table))?;
            match mutation {
                Mutation::Put(item) => {
                    data.rows.insert(encoded, item);
                }
                Mutation::Update(key, set) => {
                    let row = data.rows.entry(encoded).or_insert(key);
                    for (name, value) in set {
                        row.insert(name, value);
                    }
                }
                Mutation::Delete => {
                    data.rows.remove(&encoded);
                }
            }
        }

        Ok(())
    }

    fn key_schema(&self, table: &str) -> StoreResult<KeySchema> {
        let tables = self.tables.read();
        let data = tables
            .get(table)
            .ok_or_else(|| StoreError::table_not_found(table))?;
        Ok(data.schema.clone())
    }
}

/// Extracts and normalizes the primary key from an attribute map.
fn normalize_key(schema: &KeySchema, attributes: &Item, table: &str) -> StoreResult<Key> {
    schema.key_of(attributes).ok_or_else(|| {
        let attribute = schema
            .missing_attribute(attributes)
            .unwrap_or_default()
            .to_string();
        StoreError::MissingKeyAttribute {
            table: table.to_string(),
            attribute,
        }
    })
}

/// Checks a directive's guard against the pre-transaction state of its item.
fn check_guard(
    guard: Option<&Guard>,
    data: &TableData,
    key: &Key,
    index: usize,
) -> StoreResult<()> {
    if let Some(guard) = guard {
        let current = data.rows.get(&encode_key(key));
        if !guard.holds(current) {
            return Err(StoreError::ConditionFailed { index });
        }
    }
    Ok(())
}
