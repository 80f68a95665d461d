//! UAB CLI - keep a local asset directory and the asset catalog in step
//!
//! Runs sync passes, shows their logs, and browses the catalog from the
//! terminal.

mod cli;
mod commands;
mod config;
mod error;


use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::common::{config_path, load_settings};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::import::run_import;
use crate::commands::list::run_list;
use crate::commands::log::run_log;
use crate::commands::sync::run_sync;
use crate::commands::tree::run_tree;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "uab=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Sync {
            json,
            export,
            no_save,
        } => {
            let settings = load_settings(&cli)?;
            run_sync(settings, *json, export.as_deref(), *no_save).await?;
        }
        Commands::Log {
            level,
            export,
            json,
        } => {
            let settings = load_settings(&cli)?;
            run_log(
                &settings.asset_directory,
                level.map(Into::into),
                export.as_deref(),
                *json,
            )?;
        }
        Commands::List { dir, search, json } => {
            run_list(
                &load_settings(&cli)?,
                dir.as_deref(),
                search.as_deref(),
                *json,
            )
            .await?;
        }
        Commands::Tree { json } => run_tree(&load_settings(&cli)?, *json).await?,
        Commands::Import { path } => {
            run_import(&load_settings(&cli)?, path).await?;
        }
        Commands::Delete { id } => run_delete(&load_settings(&cli)?, *id).await?,
        Commands::Config { command } => {
            let path = config_path(cli.config.as_deref())?;
            run_config(command, &path, &cli.overrides())?;
        }
        Commands::Completions { shell, output } => run_completions(*shell, output.as_deref())?,
    }

    Ok(())
}
