//! Physical time effect interface

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Wall-clock instant in milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PhysicalTime {
    /// Milliseconds since 1970-01-01T00:00:00Z
    pub ts_ms: u64,
}

impl PhysicalTime {
    /// Wrap a millisecond timestamp
    pub fn from_millis(ts_ms: u64) -> Self {
        Self { ts_ms }
    }

    /// Convert to a UTC datetime, clamping out-of-range values to the epoch
    pub fn to_datetime(self) -> DateTime<Utc> {
        i64::try_from(self.ts_ms)
            .ok()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .unwrap_or_default()
    }
}

/// Wall-clock time used for creation and event timestamps
#[async_trait]
pub trait PhysicalTimeEffects: Send + Sync {
    /// Current wall-clock time
    async fn physical_time(&self) -> PhysicalTime;
}
