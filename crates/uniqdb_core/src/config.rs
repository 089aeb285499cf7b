//! Directory configuration.

use crate::error::{DirectoryError, DirectoryResult};

/// Environment variable naming the users table.
pub const ENV_USERS_TABLE: &str = "UNIQDB_USERS_TABLE";
/// Environment variable naming the uniqueness-index table.
pub const ENV_UNIQUES_TABLE: &str = "UNIQDB_UNIQUES_TABLE";

/// Table names the directory operates on.
///
/// The configuration is passed explicitly into [`UserDirectory::new`];
/// nothing reads the process environment after construction.
///
/// [`UserDirectory::new`]: crate::UserDirectory::new
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// Name of the table holding user records.
    pub users_table: String,

    /// Name of the table holding uniqueness-index entries.
    pub uniques_table: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            users_table: "users".to_string(),
            uniques_table: "uniques".to_string(),
        }
    }
}

impl DirectoryConfig {
    /// Creates a new configuration with default table names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the users table name.
    #[must_use]
    pub fn users_table(mut self, name: impl Into<String>) -> Self {
        self.users_table = name.into();
        self
    }

    /// Sets the uniqueness-index table name.
    #[must_use]
    pub fn uniques_table(mut self, name: impl Into<String>) -> Self {
        self.uniques_table = name.into();
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// Consults [`ENV_USERS_TABLE`] and [`ENV_UNIQUES_TABLE`] once; the
    /// result is an ordinary value after that.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::MissingConfig`] if either variable is
    /// unset or empty.
    pub fn from_env() -> DirectoryResult<Self> {
        Ok(Self {
            users_table: env_var(ENV_USERS_TABLE)?,
            uniques_table: env_var(ENV_UNIQUES_TABLE)?,
        })
    }
}

fn env_var(name: &str) -> DirectoryResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(DirectoryError::MissingConfig {
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = DirectoryConfig::default();
        assert_eq!(config.users_table, "users");
        assert_eq!(config.uniques_table, "uniques");
    }

    #[test]
    fn builder_pattern() {
        let config = DirectoryConfig::new()
            .users_table("members")
            .uniques_table("member-uniques");

        assert_eq!(config.users_table, "members");
        assert_eq!(config.uniques_table, "member-uniques");
    }

    #[test]
    fn from_env_reports_missing_variable() {
        // Deliberately unset in the test environment.
        std::env::remove_var(ENV_USERS_TABLE);
        let result = DirectoryConfig::from_env();
        assert!(matches!(
            result,
            Err(DirectoryError::MissingConfig { ref name }) if name == ENV_USERS_TABLE
        ));
    }
}
