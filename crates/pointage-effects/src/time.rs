//! Time effect handler

use async_trait::async_trait;
use pointage_core::effects::{PhysicalTime, PhysicalTimeEffects};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Real time handler reading the system clock
#[derive(Debug, Clone, Default)]
pub struct RealTimeHandler;

impl RealTimeHandler {
    /// Create a new real time handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PhysicalTimeEffects for RealTimeHandler {
    async fn physical_time(&self) -> PhysicalTime {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis();
        PhysicalTime::from_millis(u64::try_from(ms).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_physical_time_is_after_2024() {
        let now = RealTimeHandler::new().physical_time().await;
        assert!(now.ts_ms > 1_704_067_200_000);
    }
}
