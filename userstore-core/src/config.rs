//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "database": { "path": "sample.duckdb", "user": "root", "password": "root" }
//! }
//! ```
//! Keys the CLI does not manage are preserved on save.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_DB_FILE: &str = "sample.duckdb";
pub const DEFAULT_DB_USER: &str = "root";
pub const DEFAULT_DB_PASSWORD: &str = "root";

pub const ENV_DB_PATH: &str = "USERSTORE_DB_PATH";
pub const ENV_DB_USER: &str = "USERSTORE_DB_USER";
pub const ENV_DB_PASSWORD: &str = "USERSTORE_DB_PASSWORD";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    database: DatabaseSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatabaseSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Connection settings handed to a [`UserStore`](crate::UserStore)
///
/// DuckDB has no user accounts, so `user` and `password` are carried for
/// callers and never sent to the engine.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_path: PathBuf,
    pub user: String,
    pub password: String,
}

impl StoreConfig {
    /// Settings for `database_path` with the default credentials
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            user: DEFAULT_DB_USER.to_string(),
            password: DEFAULT_DB_PASSWORD.to_string(),
        }
    }

    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("database_path", &self.database_path)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Userstore configuration (resolved view of settings)
#[derive(Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub user: String,
    pub password: String,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Config {
    /// Defaults for a data directory that has no settings file
    pub fn defaults(data_dir: &Path) -> Self {
        Self {
            database_path: data_dir.join(DEFAULT_DB_FILE),
            user: DEFAULT_DB_USER.to_string(),
            password: DEFAULT_DB_PASSWORD.to_string(),
            _raw_settings: SettingsFile::default(),
        }
    }

    /// Load config from the data directory
    ///
    /// Values come from, in increasing priority: defaults, settings.json,
    /// then the `USERSTORE_DB_*` environment variables. A relative
    /// database path is resolved against `data_dir`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::load_file(data_dir)?;
        config.apply_overrides(data_dir, |key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load settings.json without looking at the environment
    pub fn load_file(data_dir: &Path) -> Result<Self> {
        let settings_path = data_dir.join(SETTINGS_FILE);

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).map_err(|e| {
                Error::config(format!("Invalid {}: {}", settings_path.display(), e))
            })?
        } else {
            SettingsFile::default()
        };

        let defaults = Self::defaults(data_dir);
        Ok(Self {
            database_path: raw
                .database
                .path
                .as_deref()
                .map(|p| data_dir.join(p))
                .unwrap_or(defaults.database_path),
            user: raw.database.user.clone().unwrap_or(defaults.user),
            password: raw.database.password.clone().unwrap_or(defaults.password),
            _raw_settings: raw,
        })
    }

    /// Apply `USERSTORE_DB_*` overrides using `lookup` to read variables
    pub fn apply_overrides(&mut self, data_dir: &Path, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_DB_PATH).filter(|v| !v.is_empty()) {
            self.database_path = data_dir.join(path);
        }
        if let Some(user) = lookup(ENV_DB_USER) {
            self.user = user;
        }
        if let Some(password) = lookup(ENV_DB_PASSWORD) {
            self.password = password;
        }
    }

    /// Save config to the data directory
    /// Preserves other settings that the CLI doesn't manage
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join(SETTINGS_FILE);

        // Re-read so that keys edited by hand since load are kept
        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_else(|_| self._raw_settings.clone())
        } else {
            self._raw_settings.clone()
        };

        settings.database.path = Some(relative_to(&self.database_path, data_dir));
        settings.database.user = Some(self.user.clone());
        settings.database.password = Some(self.password.clone());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.database_path.clone()).with_credentials(&self.user, &self.password)
    }
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_settings_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_file(dir.path()).unwrap();

        assert_eq!(config.database_path, dir.path().join("sample.duckdb"));
        assert_eq!(config.user, "root");
        assert_eq!(config.password, "root");
    }

    #[test]
    fn test_relative_path_resolves_against_data_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"database": {"path": "other.duckdb", "user": "lab"}}"#,
        )
        .unwrap();

        let config = Config::load_file(dir.path()).unwrap();
        assert_eq!(config.database_path, dir.path().join("other.duckdb"));
        assert_eq!(config.user, "lab");
        assert_eq!(config.password, "root");
    }

    #[test]
    fn test_invalid_settings_is_config_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{not json").unwrap();

        assert!(matches!(Config::load_file(dir.path()), Err(Error::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::defaults(dir.path());
        config.apply_overrides(dir.path(), |key| match key {
            ENV_DB_PATH => Some("/var/lib/users.duckdb".to_string()),
            ENV_DB_USER => Some("tester".to_string()),
            _ => None,
        });

        assert_eq!(config.database_path, PathBuf::from("/var/lib/users.duckdb"));
        assert_eq!(config.user, "tester");
        assert_eq!(config.password, "root");
    }

    #[test]
    fn test_save_preserves_unmanaged_keys() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"theme": "dark", "database": {"timeoutMs": 500}}"#,
        )
        .unwrap();

        let mut config = Config::load_file(dir.path()).unwrap();
        config.user = "lab".to_string();
        config.save(dir.path()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join(SETTINGS_FILE)).unwrap())
                .unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["database"]["timeoutMs"], 500);
        assert_eq!(raw["database"]["user"], "lab");
        assert_eq!(raw["database"]["path"], "sample.duckdb");

        let reloaded = Config::load_file(dir.path()).unwrap();
        assert_eq!(reloaded.database_path, config.database_path);
    }

    #[test]
    fn test_store_config_debug_hides_password() {
        let store = StoreConfig::new("/tmp/x.duckdb").with_credentials("u", "secret");
        let debug = format!("{:?}", store);
        assert!(!debug.contains("secret"));
    }
}
