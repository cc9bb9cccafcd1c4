//! Statement text for the `user_data` table
//!
//! The fixed and parameterized statements are plain constants. The
//! [`vulnerable`] builders splice caller input straight into the SQL and
//! exist to demonstrate SQL injection.

pub const CREATE_USER_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS user_data (username TEXT, password TEXT)";

pub const SELECT_ALL_USERS: &str = "SELECT * FROM user_data";

pub const INSERT_USER: &str = "INSERT INTO user_data (username, password) VALUES (?, ?)";

pub const COUNT_USERS: &str = "SELECT COUNT(*) FROM user_data";

pub const FIND_USER_BOUND: &str = "SELECT * FROM user_data WHERE username = ?";

pub const DELETE_USER_BOUND: &str = "DELETE FROM user_data WHERE username = ?";

/// VULNERABLE: raw string interpolation, no escaping, no parameters.
///
/// Any quote or SQL syntax in the input becomes part of the executed
/// statement. Do not reuse outside the demonstration paths.
pub mod vulnerable {
    /// `SELECT * FROM user_data WHERE username = '<raw>'`
    pub fn find_user_query(username: &str) -> String {
        format!("SELECT * FROM user_data WHERE username = '{}'", username)
    }

    /// `DELETE FROM user_data WHERE username = '<raw>'`
    pub fn delete_user_query(username: &str) -> String {
        format!("DELETE FROM user_data WHERE username = '{}'", username)
    }
}
