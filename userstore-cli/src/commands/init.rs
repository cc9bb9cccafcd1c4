//! Init command - create the user table

use anyhow::Result;
use colored::Colorize;

use super::{get_context, get_logger, CommandLog};

pub fn run() -> Result<()> {
    let ctx = get_context()?;
    let log = CommandLog::new(get_logger(), "init")
        .with_db_user(ctx.user_store.config().user.as_str())
        .started();

    let result = ctx.ensure_schema();
    log.finish(&result);
    result?;

    println!(
        "{} user_data ready in {}",
        "✓".green(),
        ctx.config.database_path.display()
    );
    Ok(())
}
