//! Configuration inspection

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use blogctl_core::BlogConfig;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration (secrets redacted)
    Show,
    /// Print the config file location
    Path,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = crate::load_config(None)?;
            let rendered =
                toml::to_string_pretty(&config.redacted()).context("Failed to render config")?;
            print!("{}", rendered);
        }
        ConfigCommand::Path => {
            println!("{}", BlogConfig::config_path().display());
        }
    }
    Ok(())
}
