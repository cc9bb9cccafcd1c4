//! Delete command - remove users by name

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use userstore_core::OperationResult;

use super::{get_context, get_logger, CommandLog};

pub fn run(username: &str, bound: bool, force: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let log = CommandLog::new(get_logger(), "delete")
        .with_username(username)
        .with_db_user(ctx.user_store.config().user.as_str())
        .started();

    // Confirm removal unless --force
    if !force && !json {
        println!(
            "\n{}",
            format!("This will delete every row for user '{}'.", username).yellow()
        );

        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            log.cancelled();
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    // The interpolated path cannot report how many rows went away
    let result = if bound {
        ctx.user_store.delete_by_username_bound(username).map(Some)
    } else {
        ctx.user_store.delete_by_username(username).map(|_| None)
    };
    log.finish(&result);
    let deleted = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&OperationResult::ok(deleted))?);
        return Ok(());
    }

    match deleted {
        Some(count) => println!("\n{} Deleted {} row(s) for '{}'\n", "✓".green(), count, username),
        None => println!("\n{} Delete issued for '{}'\n", "✓".green(), username),
    }
    Ok(())
}
