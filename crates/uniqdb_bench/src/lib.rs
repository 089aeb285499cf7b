//! Benchmark support for UniqDB.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::sync::Arc;
use uniqdb_core::{DirectoryConfig, UniqueEntry, UserDirectory, UserRecord};
use uniqdb_store::{InMemoryStore, TableStore};

/// Creates a directory over a freshly provisioned in-memory store.
#[must_use]
pub fn provisioned_directory() -> UserDirectory {
    let store = Arc::new(InMemoryStore::new());
    let config = DirectoryConfig::default();
    store
        .create_table(&config.users_table, UserRecord::key_schema())
        .expect("fresh store");
    store
        .create_table(&config.uniques_table, UniqueEntry::key_schema())
        .expect("fresh store");
    UserDirectory::new(store as Arc<dyn TableStore>, config)
}
