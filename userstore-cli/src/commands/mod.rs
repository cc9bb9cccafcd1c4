//! CLI command implementations

pub mod config;
pub mod delete;
pub mod demo;
pub mod find;
pub mod init;
pub mod inspect;
pub mod list;
pub mod logs;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use userstore_core::{EntryPoint, LogEvent, LoggingService, UserStoreContext};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let data_dir = get_data_dir().ok()?;
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Lifecycle events for one CLI command
///
/// Every event carries the command, the username it was asked about and
/// the configured database user. The password is never recorded.
pub struct CommandLog {
    logger: Option<LoggingService>,
    command: &'static str,
    username: Option<String>,
    db_user: Option<String>,
}

impl CommandLog {
    pub fn new(logger: Option<LoggingService>, command: &'static str) -> Self {
        Self {
            logger,
            command,
            username: None,
            db_user: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_db_user(mut self, user: impl Into<String>) -> Self {
        self.db_user = Some(user.into());
        self
    }

    /// Log `<command>_started`
    pub fn started(self) -> Self {
        self.emit(self.event("started"));
        self
    }

    /// Log `<command>_completed`
    pub fn completed(&self) {
        self.emit(self.event("completed"));
    }

    /// Log `<command>_cancelled`
    pub fn cancelled(&self) {
        self.emit(self.event("cancelled"));
    }

    /// Log `<command>_completed` or `<command>_failed` with the error's source chain
    pub fn finish<T, E: std::error::Error + 'static>(&self, result: &std::result::Result<T, E>) {
        match result {
            Ok(_) => self.completed(),
            Err(e) => self.failed(e.to_string(), source_chain(e)),
        }
    }

    /// Same as [`finish`](Self::finish) for results that went through anyhow context
    pub fn finish_anyhow<T>(&self, result: &Result<T>) {
        match result {
            Ok(_) => self.completed(),
            Err(e) => {
                let top: &(dyn std::error::Error + 'static) = e.as_ref();
                self.failed(e.to_string(), source_chain(top))
            }
        }
    }

    fn failed(&self, message: String, details: Option<String>) {
        let mut event = self.event("failed").with_error(message);
        if let Some(details) = details {
            event = event.with_error_details(details);
        }
        self.emit(event);
    }

    fn event(&self, stage: &str) -> LogEvent {
        let mut event = LogEvent::new(format!("{}_{}", self.command, stage)).with_command(self.command);
        if let Some(u) = &self.username {
            event = event.with_username(u.as_str());
        }
        if let Some(u) = &self.db_user {
            event = event.with_db_user(u.as_str());
        }
        event
    }

    fn emit(&self, event: LogEvent) {
        log_event(&self.logger, event);
    }
}

// Every cause below the top-level message, outermost first
fn source_chain(e: &(dyn std::error::Error + 'static)) -> Option<String> {
    let mut parts = Vec::new();
    let mut source = e.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    (!parts.is_empty()).then(|| parts.join(": "))
}

/// Get the data directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("USERSTORE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".userstore"))
        .ok_or_else(|| anyhow!("Could not find home directory; set USERSTORE_DIR"))
}

/// Get or create the userstore context
pub fn get_context() -> Result<UserStoreContext> {
    let data_dir = get_data_dir()?;

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    UserStoreContext::new(&data_dir).context("Failed to initialize userstore context")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use userstore_core::{StoreConfig, UserStore};

    fn open_logger(dir: &TempDir) -> LoggingService {
        LoggingService::new(dir.path(), EntryPoint::Cli, "test").unwrap()
    }

    #[test]
    fn test_failed_find_logs_driver_chain_and_db_user() {
        let dir = TempDir::new().unwrap();
        // No user_data table, so the query itself fails
        let store = UserStore::new(
            StoreConfig::new(dir.path().join("users.duckdb")).with_credentials("lab", "s3cret-pw"),
        );

        let result = {
            let log = CommandLog::new(Some(open_logger(&dir)), "find")
                .with_username("alice")
                .with_db_user(store.config().user.as_str())
                .started();
            let result = store.find_by_username("alice");
            log.finish(&result);
            result
        };
        let err = result.unwrap_err();
        let driver_error = std::error::Error::source(&err).unwrap().to_string();

        let logger = open_logger(&dir);
        let entries = logger.get_recent(10).unwrap();
        assert_eq!(entries.len(), 2);

        let failed = &entries[0];
        assert_eq!(failed.event, "find_failed");
        assert_eq!(failed.command.as_deref(), Some("find"));
        assert_eq!(failed.username.as_deref(), Some("alice"));
        assert_eq!(failed.db_user.as_deref(), Some("lab"));
        assert_eq!(failed.error_message.as_deref(), Some(err.to_string().as_str()));
        assert!(failed
            .error_details
            .as_deref()
            .is_some_and(|details| details.starts_with(&driver_error)));

        assert_eq!(entries[1].event, "find_started");
        assert_eq!(entries[1].db_user.as_deref(), Some("lab"));

        let logged = serde_json::to_string(&entries).unwrap();
        assert!(!logged.contains("s3cret-pw"));
    }

    #[test]
    fn test_validation_failure_has_no_details() {
        let dir = TempDir::new().unwrap();
        let store = UserStore::new(StoreConfig::new(dir.path().join("users.duckdb")));

        {
            let log = CommandLog::new(Some(open_logger(&dir)), "delete").with_username("a b");
            log.finish(&store.delete_by_username("a b"));
        }

        let entries = open_logger(&dir).get_errors(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "delete_failed");
        assert_eq!(entries[0].error_message.as_deref(), Some("Invalid username: a b"));
        assert!(entries[0].error_details.is_none());
        assert!(entries[0].db_user.is_none());
    }

    #[test]
    fn test_anyhow_failure_logs_context_chain() {
        let dir = TempDir::new().unwrap();

        {
            let log = CommandLog::new(Some(open_logger(&dir)), "demo").with_db_user("root");
            let result: Result<usize> = Err(anyhow!("disk full")).context("Failed to insert demo users");
            log.finish_anyhow(&result);
            log.finish_anyhow(&Ok::<_, anyhow::Error>(5));
        }

        let entries = open_logger(&dir).get_recent(10).unwrap();
        assert_eq!(entries[0].event, "demo_completed");
        assert_eq!(entries[1].event, "demo_failed");
        assert_eq!(entries[1].error_message.as_deref(), Some("Failed to insert demo users"));
        assert_eq!(entries[1].error_details.as_deref(), Some("disk full"));
    }

    #[test]
    fn test_missing_logger_is_silent() {
        let log = CommandLog::new(None, "list").started();
        log.finish(&Ok::<_, userstore_core::Error>(()));
        log.cancelled();
    }
}
