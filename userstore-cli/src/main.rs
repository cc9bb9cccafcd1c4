//! Userstore CLI - list, find and delete users in a DuckDB file

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{config, delete, demo, find, init, inspect, list, logs};

/// Userstore - user records over a local DuckDB file
#[derive(Parser)]
#[command(name = "userstore", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the user table
    Init,

    /// List every user
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find a user by username
    Find {
        /// Username to look up
        username: String,
        /// Use the parameterized query instead of the interpolated one
        #[arg(long)]
        bound: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a user by username
    Delete {
        /// Username to delete
        username: String,
        /// Use the parameterized statement instead of the interpolated one
        #[arg(long)]
        bound: bool,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the SQL an input would produce, without running it
    Inspect {
        /// Raw input, not validated
        input: String,
        /// Inspect the delete statement instead of the lookup
        #[arg(long)]
        delete: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage sample data
    Demo {
        #[command(subcommand)]
        command: demo::DemoCommands,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },

    /// View and update settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => init::run(),
        Commands::List { json } => list::run(json),
        Commands::Find { username, bound, json } => find::run(&username, bound, json),
        Commands::Delete { username, bound, force, json } => {
            delete::run(&username, bound, force, json)
        }
        Commands::Inspect { input, delete, json } => inspect::run(&input, delete, json),
        Commands::Demo { command } => demo::run(command),
        Commands::Logs { command } => logs::run(command),
        Commands::Config { command } => config::run(command),
    }
}
