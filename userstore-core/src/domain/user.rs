//! User domain model

use serde::{Deserialize, Serialize};

/// One row of the `user_data` table
///
/// The password is stored in plaintext by this schema and is carried
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
