//! Attendance commands

use crate::runtime::PointageRuntime;
use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use pointage_attendance::{
    format_date, format_time, AttendanceKind, AttendanceLog, DateRange, NewAttendance, QrPayload,
};

/// Attendance commands
#[derive(Debug, Clone, Subcommand)]
pub enum AttendanceCommand {
    /// Record a check-in or check-out
    Record {
        /// Employee identifier
        user_id: String,
        /// `check-in` or `check-out`
        kind: AttendanceKind,
        /// Scanned location QR text
        #[arg(long)]
        qr: Option<String>,
        /// Latitude in degrees
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude in degrees
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// List an employee's events, newest first
    History {
        /// Employee identifier
        user_id: String,
        /// Only today's events
        #[arg(long, conflicts_with_all = ["from", "to"])]
        today: bool,
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

/// Run an attendance command
pub async fn handle_attendance_command(
    cmd: AttendanceCommand,
    runtime: &PointageRuntime,
) -> Result<()> {
    let log = &runtime.attendance;
    match cmd {
        AttendanceCommand::Record {
            user_id,
            kind,
            qr,
            lat,
            lon,
        } => {
            let mut entry = NewAttendance::new(user_id, kind);
            if let Some(qr) = qr {
                let Some(payload) = QrPayload::parse(&qr) else {
                    bail!("Invalid QR code");
                };
                println!("Location: {}", payload.location_name);
                entry = entry.qr_code_data(qr);
            }
            if let (Some(lat), Some(lon)) = (lat, lon) {
                entry = entry.location(lat, lon);
            }
            let id = log.record(entry).await?;
            println!("Recorded {kind} ({id})");
        }

        AttendanceCommand::History {
            user_id,
            today,
            from,
            to,
        } => {
            let records = if today {
                log.today(&user_id, runtime.offset).await?
            } else {
                let range = DateRange::local_bounds(from, to, runtime.offset)?;
                log.history(&user_id, Some(range)).await?
            };
            if records.is_empty() {
                println!("No attendance recorded");
            }
            for record in records {
                println!(
                    "{}  {}  {:<9}",
                    format_date(record.timestamp, runtime.offset),
                    format_time(record.timestamp, runtime.offset),
                    record.kind
                );
            }
        }
    }
    Ok(())
}
