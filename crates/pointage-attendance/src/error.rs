//! Attendance errors

use chrono::{DateTime, Utc};
use pointage_core::StorageError;

/// Errors raised by the attendance log
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttendanceError {
    /// The storage backend failed
    #[error("Attendance storage failed: {0}")]
    Storage(#[from] StorageError),

    /// The stored log could not be encoded or decoded
    #[error("Attendance log serialization failed: {reason}")]
    Serialization {
        /// Codec failure description
        reason: String,
    },

    /// A date range ends before it starts
    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange {
        /// Range start
        from: DateTime<Utc>,
        /// Range end
        to: DateTime<Utc>,
    },
}

/// Attendance result type
pub type Result<T> = std::result::Result<T, AttendanceError>;

impl From<serde_json::Error> for AttendanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
