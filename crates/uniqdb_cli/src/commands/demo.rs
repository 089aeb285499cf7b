//! The uniqueness-constraint walkthrough.
//!
//! Replays the canonical sequence against a fresh in-memory store: two
//! inserts, two rejected duplicates, single- and both-field updates, and a
//! delete, printing both tables after each stage.

use crate::render::render_table;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info};
use uniqdb_core::{DirectoryConfig, DirectoryError, UniqueEntry, UserDirectory, UserRecord};
use uniqdb_store::{InMemoryStore, TableStore};

/// Runs the demo.
pub fn run() -> Result<(), Box<dyn Error>> {
    // Table names come from the environment when set, defaults otherwise.
    let config = match DirectoryConfig::from_env() {
        Ok(config) => config,
        Err(_) => {
            debug!("table names not configured, using defaults");
            DirectoryConfig::default()
        }
    };
    info!(
        users = %config.users_table,
        uniques = %config.uniques_table,
        "provisioning in-memory tables"
    );

    let store = Arc::new(InMemoryStore::new());
    store.create_table(&config.users_table, UserRecord::key_schema())?;
    store.create_table(&config.uniques_table, UniqueEntry::key_schema())?;
    let directory = UserDirectory::new(Arc::clone(&store) as Arc<dyn TableStore>, config.clone());

    println!("===== Adding user1 =====");
    directory.insert("user1", "user1@example.com", "user1")?;
    print_tables(store.as_ref(), &config)?;

    println!("Adding user2 with the same email");
    expect_rejected(directory.insert("user2", "user1@example.com", "user2"))?;

    println!("Adding user2 with the same username");
    expect_rejected(directory.insert("user2", "user2@example.com", "user1"))?;
    print_tables(store.as_ref(), &config)?;

    println!("===== Adding user2 =====");
    directory.insert("user2", "user2@example.com", "user2")?;
    print_tables(store.as_ref(), &config)?;

    println!("===== Changing email =====");
    directory.update("user1", "user1-2@example.com", "user1")?;
    print_tables(store.as_ref(), &config)?;

    println!("===== Changing username =====");
    directory.update("user1", "user1-2@example.com", "user1-2")?;
    print_tables(store.as_ref(), &config)?;

    println!("===== Changing both username and email =====");
    directory.update("user1", "user1-3@example.com", "user1-3")?;
    print_tables(store.as_ref(), &config)?;

    println!("===== Delete user2 =====");
    directory.delete("user2")?;
    print_tables(store.as_ref(), &config)?;

    Ok(())
}

fn print_tables(store: &dyn TableStore, config: &DirectoryConfig) -> Result<(), Box<dyn Error>> {
    print!("{}", render_table(store, &config.users_table)?);
    print!("{}", render_table(store, &config.uniques_table)?);
    Ok(())
}

/// Asserts that an operation was rejected by a uniqueness guard.
fn expect_rejected(result: Result<(), DirectoryError>) -> Result<(), Box<dyn Error>> {
    match result {
        Err(DirectoryError::ConstraintViolation { message }) => {
            println!("Failed: {message}");
            Ok(())
        }
        Ok(()) => Err("operation unexpectedly succeeded".into()),
        Err(other) => Err(other.into()),
    }
}
