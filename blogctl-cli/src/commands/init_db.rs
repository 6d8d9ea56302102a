//! Database initialisation command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use blogctl_core::{create_pool, init_schema, reset_schema};

#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// SQLite database file (overrides config/environment)
    #[arg(long, env = "BLOGCTL_DATABASE")]
    pub database: Option<PathBuf>,

    /// Drop the existing entries table first (deletes all entries)
    #[arg(long)]
    pub reset: bool,
}

pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let config = crate::load_config(args.database)?;
    let path = &config.database;

    let pool = create_pool(path)
        .await
        .with_context(|| format!("Failed to open database {}", path.display()))?;

    if args.reset {
        reset_schema(&pool).await.context("Failed to reset schema")?;
    } else {
        init_schema(&pool).await.context("Failed to create schema")?;
    }
    pool.close().await;

    tracing::info!(database = %path.display(), reset = args.reset, "Database initialized");
    println!("Initialized database at {}", path.display());
    Ok(())
}
