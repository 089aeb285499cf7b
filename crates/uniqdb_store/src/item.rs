//! Item and key representation.
//!
//! Stores are schemaless: an item is an attribute map from names to JSON
//! values. `BTreeMap` keeps attribute order deterministic, which the
//! reference store relies on for canonical key encoding and which makes
//! table snapshots directly comparable in tests.

use serde_json::Value;
use std::collections::BTreeMap;

/// A stored item: a schemaless map of attribute names to values.
pub type Item = BTreeMap<String, Value>;

/// A primary key: the subset of an item's attributes named by the table's
/// key schema.
pub type Key = BTreeMap<String, Value>;
