//! Location QR payload commands

use crate::runtime::PointageRuntime;
use anyhow::{bail, Result};
use clap::Subcommand;
use pointage_attendance::{format_date_time, QrPayload};

/// QR payload commands
#[derive(Debug, Clone, Subcommand)]
pub enum QrCommand {
    /// Print the payload to encode in a location QR code
    Generate {
        /// Stable location identifier
        #[arg(long)]
        location_id: String,
        /// Human-readable location name
        #[arg(long)]
        location_name: String,
        /// Owning company
        #[arg(long)]
        company_id: String,
    },

    /// Decode scanned QR text
    Check {
        /// Raw scanned text
        payload: String,
    },
}

/// Run a QR command
pub async fn handle_qr_command(cmd: QrCommand, runtime: &PointageRuntime) -> Result<()> {
    match cmd {
        QrCommand::Generate {
            location_id,
            location_name,
            company_id,
        } => {
            let payload = QrPayload::for_location(
                location_id,
                location_name,
                company_id,
                runtime.clock.as_ref(),
            )
            .await;
            println!("{}", payload.encode());
        }

        QrCommand::Check { payload } => {
            let Some(decoded) = QrPayload::parse(&payload) else {
                bail!("Invalid QR code");
            };
            println!("Location: {} ({})", decoded.location_name, decoded.location_id);
            println!("Company:  {}", decoded.company_id);
            if let Some(issued) = decoded.issued_at() {
                println!("Issued:   {}", format_date_time(issued, runtime.offset));
            }
        }
    }
    Ok(())
}
