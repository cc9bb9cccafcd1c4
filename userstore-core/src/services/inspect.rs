//! Inspect service - show what the interpolating builders would execute
//!
//! Renders the statement for an arbitrary input, parses it with the DuckDB
//! dialect and compares it with the statement a properly quoted literal
//! would produce. Nothing is validated and no database is opened.
//!
//! The username validator rejects every input containing a quote, a space
//! or `=`, so the injections shown here cannot reach storage through
//! [`UserStore`](crate::UserStore). The builders stay vulnerable all the same.

use serde::Serialize;
use sqlparser::ast::Statement;
use sqlparser::dialect::DuckDbDialect;
use sqlparser::parser::Parser;

use crate::adapters::sql::vulnerable;
use crate::domain::username::is_valid_username;

/// Which statement shape to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Find,
    Delete,
}

impl StatementKind {
    fn render(self, username: &str) -> String {
        match self {
            StatementKind::Find => vulnerable::find_user_query(username),
            StatementKind::Delete => vulnerable::delete_user_query(username),
        }
    }
}

/// What an input does to the interpolated statement
#[derive(Debug, Clone, Serialize)]
pub struct InjectionReport {
    pub kind: StatementKind,
    pub input: String,
    /// SQL text exactly as it would be sent to the engine
    pub sql: String,
    pub passes_validation: bool,
    pub parses: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
    pub statement_count: usize,
    /// The statement no longer compares `username` with the input as one literal
    pub altered: bool,
}

/// Inspect the find statement built from `input`
pub fn inspect_lookup(input: &str) -> InjectionReport {
    inspect(StatementKind::Find, input)
}

/// Inspect the delete statement built from `input`
pub fn inspect_delete(input: &str) -> InjectionReport {
    inspect(StatementKind::Delete, input)
}

pub fn inspect(kind: StatementKind, input: &str) -> InjectionReport {
    let sql = kind.render(input);
    let intended = kind.render(&quote_literal(input));

    let (parses, parse_error, statements) = match parse(&sql) {
        Ok(statements) => (true, None, statements),
        Err(e) => (false, Some(e), Vec::new()),
    };

    let altered = match parse(&intended) {
        Ok(expected) => !parses || !same_statements(&statements, &expected),
        Err(_) => true,
    };

    InjectionReport {
        kind,
        input: input.to_string(),
        passes_validation: is_valid_username(input),
        parses,
        parse_error,
        statement_count: statements.len(),
        altered,
        sql,
    }
}

// The parser's "sql parser error: " prefix is stripped from the message
fn parse(sql: &str) -> Result<Vec<Statement>, String> {
    let dialect = DuckDbDialect {};
    Parser::parse_sql(&dialect, sql).map_err(|e| {
        let msg = e.to_string();
        msg.trim_start_matches("sql parser error: ").to_string()
    })
}

// Escapes the input the way a SQL string literal requires
fn quote_literal(input: &str) -> String {
    input.replace('\'', "''")
}

// Compared through the canonical rendering so token spans do not matter
fn same_statements(a: &[Statement], b: &[Statement]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_string() == y.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_is_not_altered() {
        let report = inspect_lookup("alice");
        assert_eq!(report.sql, "SELECT * FROM user_data WHERE username = 'alice'");
        assert!(report.passes_validation);
        assert!(report.parses);
        assert_eq!(report.statement_count, 1);
        assert!(!report.altered);
    }

    #[test]
    fn test_tautology_alters_lookup() {
        let report = inspect_lookup("alice' OR '1'='1");
        assert_eq!(
            report.sql,
            "SELECT * FROM user_data WHERE username = 'alice' OR '1'='1'"
        );
        assert!(!report.passes_validation);
        assert!(report.parses);
        assert!(report.altered);
    }

    #[test]
    fn test_stacked_statement_alters_delete() {
        let report = inspect_delete("x'; DROP TABLE user_data; --");
        assert!(report.altered);
        assert!(report.statement_count >= 2);
    }

    #[test]
    fn test_stray_quote_breaks_parsing() {
        let report = inspect_lookup("o'neil");
        assert!(!report.parses);
        assert!(report.parse_error.is_some());
        assert!(report.altered);
    }

    #[test]
    fn test_space_without_quote_is_harmless_but_invalid() {
        let report = inspect_lookup("a b");
        assert!(!report.passes_validation);
        assert!(!report.altered);
    }

    #[test]
    fn test_valid_usernames_never_alter_statements() {
        for name in ["bob", "carol_99", "OR", "DROP", "_1"] {
            assert!(!inspect_lookup(name).altered, "{name}");
            assert!(!inspect_delete(name).altered, "{name}");
        }
    }

    #[test]
    fn test_parse_error_has_no_prefix() {
        let report = inspect_lookup("a'b");
        let err = report.parse_error.unwrap();
        assert!(!err.is_empty());
        assert!(!err.contains("sql parser error:"));
    }

    #[test]
    fn test_unclosed_string() {
        assert!(parse("SELECT * FROM user_data WHERE username = 'test").is_err());
        assert!(parse("DELETE FROM user_data WHERE username = 'abc'").is_ok());
    }

    #[test]
    fn test_typo_in_keyword() {
        assert!(parse("SELEC * FROM user_data").is_err());
    }
}
