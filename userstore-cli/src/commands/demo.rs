//! Demo command - manage sample data

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::{get_context, get_logger, CommandLog};

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Create the table and insert sample users
    Seed,
    /// Delete the database file
    Reset,
}

pub fn run(command: DemoCommands) -> Result<()> {
    let ctx = get_context()?;
    let log = CommandLog::new(get_logger(), "demo")
        .with_db_user(ctx.user_store.config().user.as_str())
        .started();

    match command {
        DemoCommands::Seed => {
            let result = ctx.demo_service.seed();
            log.finish_anyhow(&result);
            let inserted = result?;
            println!("{}", format!("Inserted {} demo users", inserted).green());
            println!("Run 'userstore list' to see them.");
        }
        DemoCommands::Reset => {
            let result = ctx.demo_service.reset();
            log.finish_anyhow(&result);
            result?;
            println!(
                "{}",
                format!("Removed {}", ctx.config.database_path.display()).yellow()
            );
        }
    }
    Ok(())
}
