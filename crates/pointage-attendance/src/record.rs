//! Attendance records

use crate::error::{AttendanceError, Result};
use chrono::{DateTime, Days, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of an attendance event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceKind {
    /// Arrival
    #[serde(rename = "check-in")]
    CheckIn,
    /// Departure
    #[serde(rename = "check-out")]
    CheckOut,
}

impl AttendanceKind {
    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CheckIn => "check-in",
            Self::CheckOut => "check-out",
        }
    }
}

impl fmt::Display for AttendanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "check-in" => Ok(Self::CheckIn),
            "check-out" => Ok(Self::CheckOut),
            other => Err(format!("unknown attendance kind '{other}'")),
        }
    }
}

/// Where the device was when the event was recorded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Degrees north
    pub latitude: f64,
    /// Degrees east
    pub longitude: f64,
}

/// A stored attendance event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Opaque record id
    pub id: String,
    /// Employee who scanned
    pub user_id: String,
    /// When the event was recorded
    pub timestamp: DateTime<Utc>,
    /// Check-in or check-out
    #[serde(rename = "type")]
    pub kind: AttendanceKind,
    /// Device position, if available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    /// Raw scanned QR text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code_data: Option<String>,
}

/// Request to record an event
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttendance {
    /// Employee who scanned
    pub user_id: String,
    /// Check-in or check-out
    pub kind: AttendanceKind,
    /// Raw scanned QR text
    pub qr_code_data: Option<String>,
    /// Device position
    pub location: Option<GeoPoint>,
}

impl NewAttendance {
    /// Event with no QR text and no position
    pub fn new(user_id: impl Into<String>, kind: AttendanceKind) -> Self {
        Self {
            user_id: user_id.into(),
            kind,
            qr_code_data: None,
            location: None,
        }
    }

    /// Attach the scanned QR text
    pub fn qr_code_data(mut self, data: impl Into<String>) -> Self {
        self.qr_code_data = Some(data.into());
        self
    }

    /// Attach the device position
    pub fn location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(GeoPoint {
            latitude,
            longitude,
        });
        self
    }
}

/// Half-open time window `[from, to)`; a missing bound is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Window between two optional bounds
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Result<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(AttendanceError::InvalidRange { from, to });
            }
        }
        Ok(Self { from, to })
    }

    /// Calendar days `first..=last` in the given offset
    pub fn local_days(first: NaiveDate, last: NaiveDate, offset: FixedOffset) -> Result<Self> {
        Self::local_bounds(Some(first), Some(last), offset)
    }

    /// From the start of `first` to the end of `last`, either side optional
    pub fn local_bounds(
        first: Option<NaiveDate>,
        last: Option<NaiveDate>,
        offset: FixedOffset,
    ) -> Result<Self> {
        let from = first.and_then(|day| local_midnight(day, offset));
        let to = last
            .and_then(|day| day.checked_add_days(Days::new(1)))
            .and_then(|next| local_midnight(next, offset));
        Self::new(from, to)
    }

    /// The calendar day containing `instant` in the given offset
    pub fn local_day_of(instant: DateTime<Utc>, offset: FixedOffset) -> Result<Self> {
        let day = instant.with_timezone(&offset).date_naive();
        Self::local_days(day, day, offset)
    }

    /// Inclusive start
    pub fn from(&self) -> Option<DateTime<Utc>> {
        self.from
    }

    /// Exclusive end
    pub fn to(&self) -> Option<DateTime<Utc>> {
        self.to
    }

    /// Whether `instant` falls inside the window
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| instant >= from) && self.to.map_or(true, |to| instant < to)
    }
}

fn local_midnight(day: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    offset
        .from_local_datetime(&day.and_hms_opt(0, 0, 0)?)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}
