//! Result and error types for the core library

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    /// The username contains characters outside `[A-Za-z0-9_]`
    #[error("Invalid username: {0}")]
    Validation(String),

    /// The username is reserved and may not be deleted
    #[error("Deletion of user '{0}' is not allowed.")]
    Policy(String),

    /// The engine could not open the database or run the statement
    #[error("{operation}: {source}")]
    DataAccess {
        operation: String,
        #[source]
        source: duckdb::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(username: impl Into<String>) -> Self {
        Self::Validation(username.into())
    }

    /// Create a policy error
    pub fn policy(username: impl Into<String>) -> Self {
        Self::Policy(username.into())
    }

    /// Wrap a driver failure, naming the operation that was attempted
    pub fn data_access(operation: impl Into<String>, source: duckdb::Error) -> Self {
        Self::DataAccess {
            operation: operation.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// JSON envelope for CLI output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.to_string()),
        }
    }
}
