//! Pointage operator CLI
//!
//! Manage controller accounts, print and check location QR payloads, and
//! record attendance from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pointage_cli::commands::{
    handle_attendance_command, handle_config_command, handle_controller_command,
    handle_qr_command, AttendanceCommand, ConfigCommand, ControllerCommand, QrCommand,
};
use pointage_cli::{default_config_path, init_logging, PointageConfig, PointageRuntime};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pointage")]
#[command(about = "Pointage - QR attendance and controller management", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (default: <data dir>/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Controller account management
    #[command(subcommand)]
    Controller(ControllerCommand),

    /// Location QR payloads
    #[command(subcommand)]
    Qr(QrCommand),

    /// Attendance events
    #[command(subcommand)]
    Attendance(AttendanceCommand),

    /// Configuration file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = PointageConfig::load(&config_path)?;
    init_logging(cli.verbose, &config.logging.level);

    let runtime = || PointageRuntime::from_config(&config);
    match cli.command {
        Commands::Config(cmd) => handle_config_command(cmd, &config, &config_path)?,
        Commands::Controller(cmd) => handle_controller_command(cmd, &runtime()?).await?,
        Commands::Qr(cmd) => handle_qr_command(cmd, &runtime()?).await?,
        Commands::Attendance(cmd) => handle_attendance_command(cmd, &runtime()?).await?,
    }
    Ok(())
}
