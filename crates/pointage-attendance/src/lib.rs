//! # Pointage Attendance
//!
//! **Purpose**: Model the check-in/check-out events employees produce by
//! scanning a location QR code, and the log that keeps them.
//!
//! - [`qr`]: the JSON payload printed in location QR codes
//! - [`record`]: attendance events and the request to record one
//! - [`log`]: the [`AttendanceLog`] interface and a storage-backed
//!   [`LocalAttendanceLog`]
//! - [`display`]: French-style date and time rendering
//!
//! The remote event backend is not part of this crate; anything implementing
//! [`AttendanceLog`] can stand in for it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Date and time rendering
pub mod display;

/// Attendance errors
pub mod error;

/// Attendance log interface and local implementation
pub mod log;

/// Location QR payloads
pub mod qr;

/// Attendance records
pub mod record;

pub use display::{format_date, format_date_time, format_time, utc_offset};
pub use error::{AttendanceError, Result};
pub use log::{AttendanceLog, LocalAttendanceLog, DEFAULT_ATTENDANCE_KEY};
pub use qr::QrPayload;
pub use record::{AttendanceKind, AttendanceRecord, DateRange, GeoPoint, NewAttendance};
