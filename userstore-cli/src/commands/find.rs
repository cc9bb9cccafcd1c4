//! Find command - look a user up by name

use anyhow::Result;
use colored::Colorize;
use userstore_core::OperationResult;

use super::{get_context, get_logger, CommandLog};
use crate::output;

pub fn run(username: &str, bound: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let log = CommandLog::new(get_logger(), "find")
        .with_username(username)
        .with_db_user(ctx.user_store.config().user.as_str())
        .started();

    let result = if bound {
        ctx.user_store.find_by_username_bound(username)
    } else {
        ctx.user_store.find_by_username(username)
    };
    log.finish(&result);
    let user = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&OperationResult::ok(user))?);
        return Ok(());
    }

    match user {
        Some(user) => {
            let mut table = output::create_table();
            table.add_row(vec!["Username", user.username.as_str()]);
            table.add_row(vec!["Password", user.password.as_str()]);
            println!("{}", table);
        }
        None => {
            println!("{}", format!("User '{}' not found", username).yellow());
        }
    }
    Ok(())
}
