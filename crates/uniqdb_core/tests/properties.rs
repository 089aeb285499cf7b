//! Property-based tests for the directory.
//!
//! Random interleaved insert/update/delete sequences drawn from small id
//! and value pools are replayed against the in-memory store alongside a
//! plain map model. After every operation, committed state must satisfy
//! uniqueness and referential consistency, and the real outcome must agree
//! with the model.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::BTreeMap;
use std::sync::Arc;
use uniqdb_core::{
    DirectoryConfig, DirectoryError, UniqueEntry, UniqueKind, UserDirectory, UserRecord,
};
use uniqdb_store::{InMemoryStore, TableStore};

#[derive(Debug, Clone)]
enum Op {
    Insert { id: u8, email: u8, username: u8 },
    Update { id: u8, email: u8, username: u8 },
    Delete { id: u8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..4u8, 0..6u8, 0..6u8).prop_map(|(id, email, username)| Op::Insert {
            id,
            email,
            username
        }),
        (0..4u8, 0..6u8, 0..6u8).prop_map(|(id, email, username)| Op::Update {
            id,
            email,
            username
        }),
        (0..4u8).prop_map(|id| Op::Delete { id }),
    ]
}

fn user_id(n: u8) -> String {
    format!("user{n}")
}

fn email(n: u8) -> String {
    format!("e{n}@example.com")
}

fn username(n: u8) -> String {
    format!("name{n}")
}

fn fixture() -> (Arc<InMemoryStore>, UserDirectory) {
    let store = Arc::new(InMemoryStore::new());
    let config = DirectoryConfig::default();
    store
        .create_table(&config.users_table, UserRecord::key_schema())
        .unwrap();
    store
        .create_table(&config.uniques_table, UniqueEntry::key_schema())
        .unwrap();
    let directory = UserDirectory::new(Arc::clone(&store) as Arc<dyn TableStore>, config);
    (store, directory)
}

/// The reference model: id -> (email, username).
type Model = BTreeMap<String, (String, String)>;

fn model_insert(model: &mut Model, id: &str, email: &str, username: &str) -> bool {
    let id_taken = model.contains_key(id);
    let email_taken = model.values().any(|(e, _)| e == email);
    let username_taken = model.values().any(|(_, u)| u == username);
    if id_taken || email_taken || username_taken {
        return false;
    }
    model.insert(id.to_string(), (email.to_string(), username.to_string()));
    true
}

/// Returns `None` if the user is absent, otherwise whether the update was
/// accepted (including trivially, as a no-op).
fn model_update(model: &mut Model, id: &str, email: &str, username: &str) -> Option<bool> {
    let (current_email, current_username) = model.get(id)?.clone();
    let email_conflict = current_email != email
        && model
            .iter()
            .any(|(other, (e, _))| other != id && e == email);
    let username_conflict = current_username != username
        && model
            .iter()
            .any(|(other, (_, u))| other != id && u == username);
    if email_conflict || username_conflict {
        return Some(false);
    }
    model.insert(id.to_string(), (email.to_string(), username.to_string()));
    Some(true)
}

fn check_invariants(store: &InMemoryStore) {
    let users: Vec<UserRecord> = store
        .scan("users")
        .unwrap()
        .into_iter()
        .map(|item| UserRecord::from_item(item).unwrap())
        .collect();
    let uniques: Vec<UniqueEntry> = store
        .scan("uniques")
        .unwrap()
        .iter()
        .map(|item| UniqueEntry::from_item(item).unwrap())
        .collect();

    let emails: std::collections::BTreeSet<&str> =
        users.iter().map(|u| u.email.as_str()).collect();
    let usernames: std::collections::BTreeSet<&str> =
        users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(emails.len(), users.len(), "duplicate email among records");
    assert_eq!(
        usernames.len(),
        users.len(),
        "duplicate username among records"
    );

    assert_eq!(uniques.len(), users.len() * 2);
    for user in &users {
        assert!(uniques.contains(&UniqueEntry::email(&user.email)));
        assert!(uniques.contains(&UniqueEntry::username(&user.username)));
    }
    for entry in &uniques {
        assert!(users.iter().any(|u| match entry.kind {
            UniqueKind::Email => u.email == entry.value,
            UniqueKind::Username => u.username == entry.value,
        }));
    }
}

proptest! {
    #[test]
    fn random_operations_preserve_invariants(
        ops in prop::collection::vec(op_strategy(), 1..40)
    ) {
        let (store, directory) = fixture();
        let mut model = Model::new();

        for op in ops {
            match op {
                Op::Insert { id, email: e, username: u } => {
                    let (id, e, u) = (user_id(id), email(e), username(u));
                    let accepted = model_insert(&mut model, &id, &e, &u);
                    let result = directory.insert(&id, &e, &u);
                    match result {
                        Ok(()) => prop_assert!(accepted, "insert {id} should have been rejected"),
                        Err(DirectoryError::ConstraintViolation { .. }) => {
                            prop_assert!(!accepted, "insert {id} should have been accepted");
                        }
                        Err(other) => return Err(TestCaseError::fail(format!(
                            "unexpected error: {other}"
                        ))),
                    }
                }
                Op::Update { id, email: e, username: u } => {
                    let (id, e, u) = (user_id(id), email(e), username(u));
                    let expected = model_update(&mut model, &id, &e, &u);
                    let result = directory.update(&id, &e, &u);
                    match (expected, result) {
                        (None, Err(DirectoryError::NotFound { .. })) => {}
                        (Some(true), Ok(())) => {}
                        (Some(false), Err(DirectoryError::ConstraintViolation { .. })) => {}
                        (expected, result) => return Err(TestCaseError::fail(format!(
                            "update {id}: model {expected:?} vs actual {result:?}"
                        ))),
                    }
                }
                Op::Delete { id } => {
                    let id = user_id(id);
                    let existed = model.remove(&id).is_some();
                    let result = directory.delete(&id);
                    match result {
                        Ok(()) => prop_assert!(existed, "delete {id} should have been NotFound"),
                        Err(DirectoryError::NotFound { .. }) => {
                            prop_assert!(!existed, "delete {id} should have succeeded");
                        }
                        Err(other) => return Err(TestCaseError::fail(format!(
                            "unexpected error: {other}"
                        ))),
                    }
                }
            }

            check_invariants(&store);
        }

        // Final state agrees with the model record-for-record.
        let mut listed = directory.list().unwrap();
        listed.sort_by(|a, b| a.id.cmp(&b.id));
        let expected: Vec<UserRecord> = model
            .iter()
            .map(|(id, (e, u))| UserRecord::new(id.clone(), e.clone(), u.clone()))
            .collect();
        prop_assert_eq!(listed, expected);
    }
}
