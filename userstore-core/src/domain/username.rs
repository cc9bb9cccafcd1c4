//! Username rules
//!
//! Lookups only require the allowed character class. Deletions also refuse
//! the reserved account names.

use std::sync::LazyLock;

use regex::Regex;

use super::result::{Error, Result};

static VALID_USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("username pattern compiles"));

static RESERVED_USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(admin|root|system)$").expect("reserved pattern compiles"));

/// True when every character is an ASCII letter, digit or underscore
pub fn is_valid_username(username: &str) -> bool {
    VALID_USERNAME.is_match(username)
}

/// True for `admin`, `root` and `system` in any letter case
pub fn is_reserved_username(username: &str) -> bool {
    RESERVED_USERNAME.is_match(username)
}

/// Check a username before it is used in a lookup
pub fn validate_lookup(username: &str) -> Result<()> {
    if !is_valid_username(username) {
        return Err(Error::validation(username));
    }
    Ok(())
}

/// Check a username before it is used in a deletion
pub fn validate_deletion(username: &str) -> Result<()> {
    validate_lookup(username)?;
    if is_reserved_username(username) {
        return Err(Error::policy(username));
    }
    Ok(())
}
