//! Configuration commands

use crate::config::PointageConfig;
use anyhow::{bail, Result};
use clap::Subcommand;
use std::path::Path;

/// Configuration commands
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Run a configuration command
pub fn handle_config_command(
    cmd: ConfigCommand,
    config: &PointageConfig,
    config_path: &Path,
) -> Result<()> {
    match cmd {
        ConfigCommand::Init { force } => {
            if config_path.exists() && !force {
                bail!(
                    "Config file {} already exists (use --force to overwrite)",
                    config_path.display()
                );
            }
            PointageConfig::default().save(config_path)?;
            println!("Wrote {}", config_path.display());
        }

        ConfigCommand::Show => {
            println!("# {}", config_path.display());
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
