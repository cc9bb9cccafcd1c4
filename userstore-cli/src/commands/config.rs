//! Config command - view and update settings.json

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use serde::Serialize;
use userstore_core::Config;

use super::get_data_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the resolved settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update settings.json
    Set {
        /// Database file (relative paths resolve against the data directory)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Database user
        #[arg(long)]
        user: Option<String>,
        /// Database password
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Serialize)]
struct ConfigView {
    data_dir: PathBuf,
    database_path: PathBuf,
    user: String,
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let data_dir = get_data_dir()?;
    std::fs::create_dir_all(&data_dir)?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&data_dir)?;
            let view = ConfigView {
                data_dir: data_dir.clone(),
                database_path: config.database_path.clone(),
                user: config.user.clone(),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
                return Ok(());
            }

            let mut table = output::create_table();
            table.add_row(vec!["Data directory".to_string(), view.data_dir.display().to_string()]);
            table.add_row(vec!["Database".to_string(), view.database_path.display().to_string()]);
            table.add_row(vec!["User".to_string(), view.user]);
            println!("{}", table);
        }
        ConfigCommands::Set { path, user, password } => {
            if path.is_none() && user.is_none() && password.is_none() {
                anyhow::bail!("Nothing to set. Use --path, --user or --password.");
            }

            // Environment overrides must not leak into the saved file
            let mut config = Config::load_file(&data_dir)?;
            if let Some(path) = path {
                config.database_path = data_dir.join(path);
            }
            if let Some(user) = user {
                config.user = user;
            }
            if let Some(password) = password {
                config.password = password;
            }
            config.save(&data_dir)?;

            println!("{} Settings saved", "✓".green());
        }
    }
    Ok(())
}
