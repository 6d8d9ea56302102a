//! blogctl CLI - single-user blog server
//!
//! Subcommands:
//! - `serve`: run the HTTP server
//! - `init-db`: create (or reset) the entries table
//! - `config`: inspect the effective configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use blogctl_core::BlogConfig;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "blogctl",
    author,
    version,
    about = "A minimal single-user blog backed by SQLite"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create the database schema
    InitDb(commands::init_db::InitDbArgs),
    /// Inspect configuration (show, path)
    Config(commands::config::ConfigArgs),
}

/// Effective configuration with an optional `--database` override on top.
pub(crate) fn load_config(database: Option<PathBuf>) -> Result<BlogConfig> {
    let mut config = BlogConfig::load().context("Failed to load configuration")?;
    if let Some(database) = database {
        config.database = database;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
        Commands::Config(args) => commands::run_config(args)?,
    }
    Ok(())
}
