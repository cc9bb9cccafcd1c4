//! Inspect command - show what an input does to the interpolated SQL

use anyhow::Result;
use colored::Colorize;
use userstore_core::services::inspect::{inspect, StatementKind};

use super::{get_context, get_logger, CommandLog};
use crate::output;

pub fn run(input: &str, delete: bool, json: bool) -> Result<()> {
    let kind = if delete {
        StatementKind::Delete
    } else {
        StatementKind::Find
    };

    // Only the configured user is read; the database is never opened
    let mut log = CommandLog::new(get_logger(), "inspect").with_username(input);
    if let Ok(ctx) = get_context() {
        log = log.with_db_user(ctx.user_store.config().user.as_str());
    }
    let log = log.started();

    let report = inspect(kind, input);
    log.completed();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.sql.bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec![
        "Passes validation".to_string(),
        yes_no(report.passes_validation),
    ]);
    table.add_row(vec!["Parses".to_string(), yes_no(report.parses)]);
    table.add_row(vec![
        "Statements".to_string(),
        report.statement_count.to_string(),
    ]);
    table.add_row(vec!["Altered".to_string(), yes_no(report.altered)]);
    println!("{}", table);

    if let Some(err) = &report.parse_error {
        println!("{}", format!("Parse error: {}", err).dimmed());
    }

    if report.altered && report.passes_validation {
        output::error("Input passes validation and still changes the statement");
    } else if report.altered {
        output::warning("Input changes the statement; the username validator rejects it");
    } else {
        output::success("Input stays inside the string literal");
    }
    Ok(())
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}
