//! User store - list, find and delete rows of `user_data`
//!
//! Each operation validates its input first, then opens a connection, runs a
//! single statement and drops the connection before returning. There is no
//! transaction spanning two calls.
//!
//! `find_by_username` and `delete_by_username` build their SQL with
//! [`vulnerable`] string interpolation. The `_bound` siblings run the same
//! statements with the username passed as a parameter.

use crate::adapters::duckdb::{row_to_user, Database};
use crate::adapters::sql::{vulnerable, DELETE_USER_BOUND, FIND_USER_BOUND, SELECT_ALL_USERS};
use crate::config::StoreConfig;
use crate::domain::result::{Error, Result};
use crate::domain::username::{validate_deletion, validate_lookup};
use crate::domain::User;

/// Stateless facade over the `user_data` table
pub struct UserStore {
    config: StoreConfig,
    database: Database,
}

impl UserStore {
    pub fn new(config: StoreConfig) -> Self {
        let database = Database::new(config.database_path.clone());
        Self { config, database }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// All rows, in whatever order the engine returns them
    pub fn list_all(&self) -> Result<Vec<User>> {
        self.fetch_all()
            .map_err(|e| Error::data_access("Error fetching all users", e))
    }

    /// Look a user up by name using the interpolated query
    ///
    /// When several rows share the name, the last one returned wins.
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        validate_lookup(username)?;

        let sql = vulnerable::find_user_query(username);
        self.fetch_last(&sql, &[])
            .map_err(|e| Error::data_access(format!("Error searching for user: {}", username), e))
    }

    /// Delete every row with this name using the interpolated statement
    ///
    /// Deleting a name that does not exist is not an error.
    pub fn delete_by_username(&self, username: &str) -> Result<()> {
        validate_deletion(username)?;

        let sql = vulnerable::delete_user_query(username);
        self.execute(&sql, &[])
            .map(|_| ())
            .map_err(|e| Error::data_access(format!("Error deleting user: {}", username), e))
    }

    /// Same as [`find_by_username`](Self::find_by_username) with the name bound as a parameter
    pub fn find_by_username_bound(&self, username: &str) -> Result<Option<User>> {
        validate_lookup(username)?;

        self.fetch_last(FIND_USER_BOUND, &[&username])
            .map_err(|e| Error::data_access(format!("Error searching for user: {}", username), e))
    }

    /// Same as [`delete_by_username`](Self::delete_by_username) with the name bound as a parameter
    ///
    /// Returns the number of rows removed.
    pub fn delete_by_username_bound(&self, username: &str) -> Result<usize> {
        validate_deletion(username)?;

        self.execute(DELETE_USER_BOUND, &[&username])
            .map_err(|e| Error::data_access(format!("Error deleting user: {}", username), e))
    }

    fn fetch_all(&self) -> duckdb::Result<Vec<User>> {
        let conn = self.database.connect()?;
        let mut stmt = conn.prepare(SELECT_ALL_USERS)?;
        let users = stmt
            .query_map([], |row| row_to_user(row))?
            .collect::<duckdb::Result<Vec<_>>>()?;
        Ok(users)
    }

    fn fetch_last(&self, sql: &str, params: &[&dyn duckdb::ToSql]) -> duckdb::Result<Option<User>> {
        let conn = self.database.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;

        let mut user = None;
        while let Some(row) = rows.next()? {
            user = Some(row_to_user(row)?);
        }
        Ok(user)
    }

    fn execute(&self, sql: &str, params: &[&dyn duckdb::ToSql]) -> duckdb::Result<usize> {
        let conn = self.database.connect()?;
        let affected = conn.execute(sql, params)?;
        Ok(affected)
    }
}
