//! The transaction coordinator for user records.

use crate::config::DirectoryConfig;
use crate::error::{DirectoryError, DirectoryResult};
use crate::record::{UserRecord, ATTR_EMAIL, ATTR_USERNAME};
use crate::uniques::UniqueEntry;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use uniqdb_store::{Guard, StoreError, TableStore, WriteDirective};

/// Field-level diff between a stored record and requested values, computed
/// once per update and driving a fixed set of directive templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldChanges {
    email: bool,
    username: bool,
}

impl FieldChanges {
    fn between(current: &UserRecord, email: &str, username: &str) -> Self {
        Self {
            email: current.email != email,
            username: current.username != username,
        }
    }

    fn any(self) -> bool {
        self.email || self.username
    }
}

/// Coordinates user-record mutations against a table store.
///
/// The directory is the only writer of the users table and the
/// uniqueness-index table; it treats the two as one consistency domain and
/// never mutates one without the matching mutation of the other inside the
/// same atomic transaction. It holds no locks and no shared mutable state:
/// isolation comes entirely from the store's `transact`.
///
/// The directory does not retry. A rejected operation leaves both tables
/// exactly as they were; callers needing retry-after-conflict semantics must
/// re-read state and resubmit.
pub struct UserDirectory {
    store: Arc<dyn TableStore>,
    config: DirectoryConfig,
}

impl UserDirectory {
    /// Creates a directory over the given store and table configuration.
    #[must_use]
    pub fn new(store: Arc<dyn TableStore>, config: DirectoryConfig) -> Self {
        Self { store, config }
    }

    /// Returns the table configuration.
    #[must_use]
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Creates a user record, claiming its email and username.
    ///
    /// Submits one atomic transaction: the record guarded absent, plus both
    /// uniqueness claims guarded absent. All three apply or none does.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::EmptyField`] if any argument is empty
    /// - [`DirectoryError::ConstraintViolation`] if the id, email, or
    ///   username is already taken; no partial state is left behind
    pub fn insert(&self, id: &str, email: &str, username: &str) -> DirectoryResult<()> {
        require_non_empty("id", id)?;
        require_non_empty("email", email)?;
        require_non_empty("username", username)?;

        let record = UserRecord::new(id, email, username);
        let directives = vec![
            WriteDirective::put(
                &self.config.users_table,
                record.to_item(),
                Some(Guard::Absent),
            ),
            WriteDirective::put(
                &self.config.uniques_table,
                UniqueEntry::email(email).to_item(),
                Some(Guard::Absent),
            ),
            WriteDirective::put(
                &self.config.uniques_table,
                UniqueEntry::username(username).to_item(),
                Some(Guard::Absent),
            ),
        ];
        self.submit(directives, &["user record", "email claim", "username claim"])
    }

    /// Updates a user's email and/or username.
    ///
    /// Reads the current record to establish the expected prior state, then
    /// submits one atomic transaction covering only the fields that changed:
    /// for each, the record field update guarded by the value just read, the
    /// release of the old claim guarded present, and the new claim guarded
    /// absent. Passing the current values is a no-op.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::EmptyField`] if any argument is empty
    /// - [`DirectoryError::NotFound`] if no record exists for `id`
    /// - [`DirectoryError::ConstraintViolation`] if a new value is already
    ///   claimed, or the record changed since it was read (stale read;
    ///   re-read and resubmit to retry)
    pub fn update(&self, id: &str, email: &str, username: &str) -> DirectoryResult<()> {
        require_non_empty("id", id)?;
        require_non_empty("email", email)?;
        require_non_empty("username", username)?;

        let current = self
            .get(id)?
            .ok_or_else(|| DirectoryError::not_found(id))?;
        let changes = FieldChanges::between(&current, email, username);
        if !changes.any() {
            debug!(id, "update is a no-op");
            return Ok(());
        }

        let mut set: BTreeMap<String, Value> = BTreeMap::new();
        let mut prior: Vec<(&str, Value)> = Vec::new();
        if changes.email {
            set.insert(ATTR_EMAIL.to_string(), json!(email));
            prior.push((ATTR_EMAIL, json!(current.email)));
        }
        if changes.username {
            set.insert(ATTR_USERNAME.to_string(), json!(username));
            prior.push((ATTR_USERNAME, json!(current.username)));
        }

        let mut directives = vec![WriteDirective::update(
            &self.config.users_table,
            UserRecord::key_of(id),
            set,
            Some(Guard::fields_equal(prior)),
        )];
        let mut labels = vec!["user record"];

        if changes.email {
            directives.push(WriteDirective::delete(
                &self.config.uniques_table,
                UniqueEntry::email(&current.email).key(),
                Some(Guard::Exists),
            ));
            labels.push("old email claim");
            directives.push(WriteDirective::put(
                &self.config.uniques_table,
                UniqueEntry::email(email).to_item(),
                Some(Guard::Absent),
            ));
            labels.push("new email claim");
        }
        if changes.username {
            directives.push(WriteDirective::delete(
                &self.config.uniques_table,
                UniqueEntry::username(&current.username).key(),
                Some(Guard::Exists),
            ));
            labels.push("old username claim");
            directives.push(WriteDirective::put(
                &self.config.uniques_table,
                UniqueEntry::username(username).to_item(),
                Some(Guard::Absent),
            ));
            labels.push("new username claim");
        }

        self.submit(directives, &labels)
    }

    /// Deletes a user record and releases its claims.
    ///
    /// Reads the current record, then submits one atomic transaction: the
    /// record delete guarded by the email and username just read (detecting
    /// a concurrent update), plus both claim deletes guarded present.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::NotFound`] if no record exists for `id`
    /// - [`DirectoryError::ConstraintViolation`] if the record changed
    ///   between read and delete
    pub fn delete(&self, id: &str) -> DirectoryResult<()> {
        let current = self
            .get(id)?
            .ok_or_else(|| DirectoryError::not_found(id))?;

        let directives = vec![
            WriteDirective::delete(
                &self.config.users_table,
                current.key(),
                Some(Guard::fields_equal([
                    (ATTR_EMAIL, json!(current.email)),
                    (ATTR_USERNAME, json!(current.username)),
                ])),
            ),
            WriteDirective::delete(
                &self.config.uniques_table,
                UniqueEntry::email(&current.email).key(),
                Some(Guard::Exists),
            ),
            WriteDirective::delete(
                &self.config.uniques_table,
                UniqueEntry::username(&current.username).key(),
                Some(Guard::Exists),
            ),
        ];
        self.submit(directives, &["user record", "email claim", "username claim"])
    }

    /// Reads the record for `id`, or `None` if absent.
    ///
    /// This is a non-transactional read of committed state.
    ///
    /// # Errors
    ///
    /// Store errors are passed through; a present but undecodable item is
    /// [`DirectoryError::MalformedRecord`].
    pub fn get(&self, id: &str) -> DirectoryResult<Option<UserRecord>> {
        self.store
            .get(&self.config.users_table, &UserRecord::key_of(id))?
            .map(UserRecord::from_item)
            .transpose()
    }

    /// Returns every user record.
    ///
    /// A non-transactional full scan; intended for presentation and tests.
    ///
    /// # Errors
    ///
    /// Store errors are passed through, decoding failures as for
    /// [`UserDirectory::get`].
    pub fn list(&self) -> DirectoryResult<Vec<UserRecord>> {
        self.store
            .scan(&self.config.users_table)?
            .into_iter()
            .map(UserRecord::from_item)
            .collect()
    }

    /// Submits a transaction, mapping a failed guard to
    /// [`DirectoryError::ConstraintViolation`].
    ///
    /// `labels` name each directive's role; the failing one is reported in
    /// the error message. Callers get the combined signal either way: the
    /// operation was rejected whole.
    fn submit(&self, directives: Vec<WriteDirective>, labels: &[&str]) -> DirectoryResult<()> {
        match self.store.transact(directives) {
            Ok(()) => Ok(()),
            Err(StoreError::ConditionFailed { index }) => {
                let label = labels.get(index).copied().unwrap_or("directive");
                debug!(index, label, "transaction rejected by guard");
                Err(DirectoryError::constraint_violation(format!(
                    "guard failed on {label}"
                )))
            }
            Err(other) => Err(other.into()),
        }
    }
}

fn require_non_empty(field: &'static str, value: &str) -> DirectoryResult<()> {
    if value.is_empty() {
        return Err(DirectoryError::EmptyField { field });
    }
    Ok(())
}

impl std::fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDirectory")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
