//! CLI command definitions and handlers

pub mod attendance;
pub mod config;
pub mod controller;
pub mod qr;

pub use attendance::{handle_attendance_command, AttendanceCommand};
pub use config::{handle_config_command, ConfigCommand};
pub use controller::{handle_controller_command, ControllerCommand};
pub use qr::{handle_qr_command, QrCommand};
