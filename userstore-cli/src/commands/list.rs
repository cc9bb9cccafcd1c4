//! List command - print every user

use anyhow::Result;
use userstore_core::OperationResult;

use super::{get_context, get_logger, CommandLog};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let log = CommandLog::new(get_logger(), "list")
        .with_db_user(ctx.user_store.config().user.as_str())
        .started();

    let result = ctx.user_store.list_all();
    log.finish(&result);
    let users = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&OperationResult::ok(users))?);
        return Ok(());
    }

    if users.is_empty() {
        output::info("No users found.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Username", "Password"]);
    for user in &users {
        table.add_row(vec![user.username.as_str(), user.password.as_str()]);
    }

    println!("{}", table);
    println!();
    println!("{} user(s)", users.len());
    Ok(())
}
