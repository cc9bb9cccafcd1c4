//! Userstore Core - user record access over a file-backed database
//!
//! The crate follows a small hexagonal layout:
//!
//! - **domain**: the `User` record, username rules and errors
//! - **adapters**: DuckDB connection handling and statement text
//! - **services**: the `UserStore` facade plus inspection, demo data and logging
//!
//! `UserStore::find_by_username` and `UserStore::delete_by_username` build
//! their SQL by string interpolation on purpose, to demonstrate SQL
//! injection. Their `_bound` siblings show the parameterized form.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod services;

use std::path::{Path, PathBuf};

pub use config::{Config, StoreConfig};
pub use domain::result::{Error, OperationResult, Result};
pub use domain::User;
pub use services::{
    DemoService, EntryPoint, InjectionReport, LogEntry, LogEvent, LoggingService, UserStore,
};

/// Main context for userstore operations
///
/// Resolves the configuration for a data directory and builds the services
/// on top of it. Nothing here holds a database connection.
pub struct UserStoreContext {
    pub data_dir: PathBuf,
    pub config: Config,
    pub user_store: UserStore,
    pub demo_service: DemoService,
}

impl UserStoreContext {
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let user_store = UserStore::new(config.store_config());
        let demo_service = DemoService::new(&config.database_path);

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            config,
            user_store,
            demo_service,
        })
    }

    /// Create the `user_data` table if it is missing
    pub fn ensure_schema(&self) -> Result<()> {
        self.user_store
            .database()
            .ensure_schema()
            .map_err(|e| Error::data_access("Error creating user table", e))
    }
}
