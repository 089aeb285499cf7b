//! # UniqDB Core
//!
//! Atomic enforcement of uniqueness constraints on user records over a
//! schemaless table store.
//!
//! The store offers only per-key conditional writes and multi-item atomic
//! transactions, with no native secondary unique indexes. This crate guarantees
//! that no two user records ever share an email or username, under
//! concurrent create/update/delete, by pairing every record mutation with
//! the matching uniqueness-index mutations inside one all-or-nothing
//! transaction.
//!
//! This crate provides:
//! - [`UserDirectory`] - the transaction coordinator
//! - [`UserRecord`] and [`UniqueEntry`] - the two-table data model
//! - [`DirectoryConfig`] - explicit table configuration
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use uniqdb_core::{DirectoryConfig, UniqueEntry, UserDirectory, UserRecord};
//! use uniqdb_store::InMemoryStore;
//!
//! let store = Arc::new(InMemoryStore::new());
//! let config = DirectoryConfig::default();
//! store
//!     .create_table(&config.users_table, UserRecord::key_schema())
//!     .unwrap();
//! store
//!     .create_table(&config.uniques_table, UniqueEntry::key_schema())
//!     .unwrap();
//!
//! let directory = UserDirectory::new(store, config);
//! directory.insert("u1", "a@x.com", "alice").unwrap();
//!
//! // The email is claimed; the whole insert is rejected, nothing partial.
//! assert!(directory.insert("u2", "a@x.com", "bob").is_err());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod directory;
mod error;
mod record;
mod uniques;

pub use config::{DirectoryConfig, ENV_UNIQUES_TABLE, ENV_USERS_TABLE};
pub use directory::UserDirectory;
pub use error::{DirectoryError, DirectoryResult};
pub use record::{UserRecord, ATTR_EMAIL, ATTR_ID, ATTR_USERNAME};
pub use uniques::{UniqueEntry, UniqueKind, ATTR_TYPE, ATTR_VALUE};
