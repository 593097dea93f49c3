//! Controllable clock

use async_trait::async_trait;
use pointage_core::effects::{PhysicalTime, PhysicalTimeEffects};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// 2022-01-01T00:00:00Z
pub const DEFAULT_TEST_TIME_MS: u64 = 1_640_995_200_000;

/// Clock that only moves when advanced explicitly
#[derive(Debug)]
pub struct MockTimeHandler {
    now_ms: AtomicU64,
}

impl MockTimeHandler {
    /// Clock frozen at [`DEFAULT_TEST_TIME_MS`]
    pub fn new() -> Self {
        Self::at(DEFAULT_TEST_TIME_MS)
    }

    /// Clock frozen at `ts_ms`
    pub fn at(ts_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(ts_ms),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }

    /// Jump to an absolute time
    pub fn set(&self, ts_ms: u64) {
        self.now_ms.store(ts_ms, Ordering::SeqCst);
    }
}

impl Default for MockTimeHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PhysicalTimeEffects for MockTimeHandler {
    async fn physical_time(&self) -> PhysicalTime {
        PhysicalTime::from_millis(self.now_ms.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_advance() {
        let clock = MockTimeHandler::new();
        clock.advance(Duration::from_secs(60));
        assert_eq!(
            clock.physical_time().await.ts_ms,
            DEFAULT_TEST_TIME_MS + 60_000
        );
    }
}
