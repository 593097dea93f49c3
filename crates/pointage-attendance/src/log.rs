//! Attendance log
//!
//! [`AttendanceLog`] is the seam the application records events through.
//! [`LocalAttendanceLog`] keeps every event in one storage slot as a JSON
//! array, which is enough for a single device.

use crate::error::Result;
use crate::record::{AttendanceRecord, DateRange, NewAttendance};
use async_trait::async_trait;
use chrono::FixedOffset;
use pointage_core::{PhysicalTimeEffects, RandomEffects, StorageEffects};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Storage key of the local log
pub const DEFAULT_ATTENDANCE_KEY: &str = "attendance_log";

/// Records and queries attendance events
#[async_trait]
pub trait AttendanceLog: Send + Sync {
    /// Store an event stamped with the current time; returns its id
    async fn record(&self, entry: NewAttendance) -> Result<String>;

    /// Events of one user inside `range` (everything when `None`), newest first
    async fn history(
        &self,
        user_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<AttendanceRecord>>;

    /// Events of one user during the current calendar day in `offset`
    async fn today(&self, user_id: &str, offset: FixedOffset) -> Result<Vec<AttendanceRecord>>;
}

/// [`AttendanceLog`] over a single storage slot
pub struct LocalAttendanceLog {
    storage: Arc<dyn StorageEffects>,
    clock: Arc<dyn PhysicalTimeEffects>,
    random: Arc<dyn RandomEffects>,
    key: String,
    write_lock: Mutex<()>,
}

impl LocalAttendanceLog {
    /// Log under [`DEFAULT_ATTENDANCE_KEY`]
    pub fn new(
        storage: Arc<dyn StorageEffects>,
        clock: Arc<dyn PhysicalTimeEffects>,
        random: Arc<dyn RandomEffects>,
    ) -> Self {
        Self::with_key(storage, clock, random, DEFAULT_ATTENDANCE_KEY)
    }

    /// Log under a custom key
    pub fn with_key(
        storage: Arc<dyn StorageEffects>,
        clock: Arc<dyn PhysicalTimeEffects>,
        random: Arc<dyn RandomEffects>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            clock,
            random,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The storage key holding the log
    pub fn key(&self) -> &str {
        &self.key
    }

    async fn load(&self) -> Result<Vec<AttendanceRecord>> {
        match self.storage.retrieve(&self.key).await? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl AttendanceLog for LocalAttendanceLog {
    async fn record(&self, entry: NewAttendance) -> Result<String> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let id = uuid::Builder::from_random_bytes(self.random.random_bytes_16().await)
            .into_uuid()
            .to_string();
        let record = AttendanceRecord {
            id: id.clone(),
            user_id: entry.user_id,
            timestamp: self.clock.physical_time().await.to_datetime(),
            kind: entry.kind,
            location: entry.location,
            qr_code_data: entry.qr_code_data,
        };
        info!(user_id = %record.user_id, kind = %record.kind, "attendance recorded");
        records.push(record);

        let bytes = serde_json::to_vec(&records)?;
        self.storage.store(&self.key, bytes).await?;
        Ok(id)
    }

    async fn history(
        &self,
        user_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<AttendanceRecord>> {
        let range = range.unwrap_or_default();
        let mut records: Vec<AttendanceRecord> = self
            .load()
            .await?
            .into_iter()
            .filter(|r| r.user_id == user_id && range.contains(r.timestamp))
            .collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        debug!(user_id, count = records.len(), "attendance history read");
        Ok(records)
    }

    async fn today(&self, user_id: &str, offset: FixedOffset) -> Result<Vec<AttendanceRecord>> {
        let now = self.clock.physical_time().await.to_datetime();
        let range = DateRange::local_day_of(now, offset)?;
        self.history(user_id, Some(range)).await
    }
}

impl std::fmt::Debug for LocalAttendanceLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalAttendanceLog")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
