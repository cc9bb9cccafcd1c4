//! DuckDB storage adapter
//!
//! Every call opens its own connection and drops it before returning, on
//! success and on failure alike. Nothing is cached between calls.

use std::path::{Path, PathBuf};

use duckdb::{params, Connection, Row};

use super::sql::{COUNT_USERS, CREATE_USER_TABLE, INSERT_USER};
use crate::domain::User;

/// Handle to a database file. Holds only the path.
#[derive(Debug, Clone)]
pub struct Database {
    db_path: PathBuf,
}

impl Database {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Open a fresh connection to the database file
    ///
    /// Extension autoloading is disabled so that cached extensions in
    /// ~/.duckdb are never picked up.
    pub fn connect(&self) -> duckdb::Result<Connection> {
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        Connection::open_with_flags(&self.db_path, config)
    }

    /// Create the `user_data` table if it does not exist yet
    pub fn ensure_schema(&self) -> duckdb::Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(CREATE_USER_TABLE)?;
        Ok(())
    }

    /// Insert one row directly, bypassing the user store
    pub fn insert_user(&self, user: &User) -> duckdb::Result<()> {
        self.insert_users(std::slice::from_ref(user)).map(|_| ())
    }

    /// Insert several rows over a single connection
    pub fn insert_users(&self, users: &[User]) -> duckdb::Result<usize> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(INSERT_USER)?;
        let mut inserted = 0;
        for user in users {
            inserted += stmt.execute(params![user.username, user.password])?;
        }
        Ok(inserted)
    }

    pub fn count_users(&self) -> duckdb::Result<i64> {
        let conn = self.connect()?;
        let count = conn.query_row(COUNT_USERS, [], |row| row.get(0))?;
        Ok(count)
    }
}

/// Map a `user_data` row to a [`User`]
///
/// Columns are read by position: `SELECT *` on this table yields
/// `username, password`. NULL cells read back as empty strings.
pub(crate) fn row_to_user(row: &Row<'_>) -> duckdb::Result<User> {
    let username: Option<String> = row.get(0)?;
    let password: Option<String> = row.get(1)?;
    Ok(User::new(
        username.unwrap_or_default(),
        password.unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_db(temp_dir: &TempDir) -> Database {
        let db = Database::new(temp_dir.path().join("test.duckdb"));
        db.ensure_schema().expect("Failed to create schema");
        db
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let db = create_test_db(&temp_dir);
        db.ensure_schema().unwrap();
        assert_eq!(db.count_users().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_count() {
        let temp_dir = TempDir::new().unwrap();
        let db = create_test_db(&temp_dir);

        db.insert_user(&User::new("alice", "p1")).unwrap();
        let inserted = db
            .insert_users(&[User::new("bob", "p2"), User::new("carol", "p3")])
            .unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(db.count_users().unwrap(), 3);
    }

    #[test]
    fn test_connect_fails_for_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(temp_dir.path().join("missing").join("test.duckdb"));
        assert!(db.connect().is_err());
    }

    #[test]
    fn test_null_cells_read_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let db = create_test_db(&temp_dir);
        {
            let conn = db.connect().unwrap();
            conn.execute("INSERT INTO user_data VALUES ('ghost', NULL)", [])
                .unwrap();
        }

        let conn = db.connect().unwrap();
        let user = conn
            .query_row("SELECT * FROM user_data", [], |row| row_to_user(row))
            .unwrap();
        assert_eq!(user, User::new("ghost", ""));
    }

    #[test]
    fn test_count_without_table_fails() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(temp_dir.path().join("empty.duckdb"));
        assert!(db.count_users().is_err());
    }
}
