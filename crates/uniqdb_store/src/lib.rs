//! # UniqDB Store
//!
//! Table store contract and reference implementation for UniqDB.
//!
//! This crate defines the storage seam UniqDB is built against: a schemaless
//! table store offering per-key conditional writes and multi-item atomic
//! transactions. Stores do not interpret item contents beyond the key
//! attributes named by each table's [`KeySchema`].
//!
//! ## Design Principles
//!
//! - Items are opaque attribute maps; only key attributes are interpreted
//! - A transaction commits completely or not at all
//! - Guards are evaluated against pre-transaction state
//! - Stores must be `Send + Sync` for concurrent access
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing, benches, and ephemeral data
//!
//! ## Example
//!
//! ```rust
//! use uniqdb_store::{Guard, InMemoryStore, Item, KeySchema, TableStore, WriteDirective};
//! use serde_json::json;
//!
//! let store = InMemoryStore::new();
//! store.create_table("users", KeySchema::hash("id")).unwrap();
//!
//! let item: Item = [("id".to_string(), json!("u1"))].into_iter().collect();
//! store
//!     .transact(vec![WriteDirective::put("users", item, Some(Guard::Absent))])
//!     .unwrap();
//! assert_eq!(store.scan("users").unwrap().len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod directive;
mod error;
mod item;
mod memory;
mod schema;

pub use backend::TableStore;
pub use directive::{Guard, WriteDirective};
pub use error::{StoreError, StoreResult};
pub use item::{Item, Key};
pub use memory::InMemoryStore;
pub use schema::{KeyRole, KeySchema};
