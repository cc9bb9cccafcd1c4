//! Demo service - sample rows for trying the store out
//!
//! Rows are written straight through the adapter; the user store itself
//! has no create operation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::adapters::duckdb::Database;
use crate::domain::User;

/// Sample rows, including one reserved name that cannot be deleted
pub fn demo_users() -> Vec<User> {
    vec![
        User::new("alice", "hunter2"),
        User::new("bob", "p@ssw0rd"),
        User::new("carol_99", "letmein"),
        User::new("dave", "qwerty"),
        User::new("admin", "admin123"),
    ]
}

/// Demo service for seeding and resetting a database file
pub struct DemoService {
    db_path: PathBuf,
}

impl DemoService {
    pub fn new(db_path: &Path) -> Self {
        Self {
            db_path: db_path.to_path_buf(),
        }
    }

    /// Create the table if needed and insert the sample rows
    ///
    /// Returns the number of rows inserted.
    pub fn seed(&self) -> Result<usize> {
        let database = Database::new(&self.db_path);
        database
            .ensure_schema()
            .with_context(|| format!("Failed to create schema in {}", self.db_path.display()))?;
        let inserted = database
            .insert_users(&demo_users())
            .context("Failed to insert demo users")?;
        Ok(inserted)
    }

    /// Delete the database file and its write-ahead log
    pub fn reset(&self) -> Result<()> {
        let wal = wal_path(&self.db_path);
        if self.db_path.exists() {
            std::fs::remove_file(&self.db_path)?;
        }
        if wal.exists() {
            std::fs::remove_file(&wal)?;
        }
        Ok(())
    }
}

fn wal_path(db_path: &Path) -> PathBuf {
    let mut name = db_path.as_os_str().to_owned();
    name.push(".wal");
    PathBuf::from(name)
}
