//! Composition root: builds the production handlers and the services on top
//! of them from a [`PointageConfig`].

use crate::config::PointageConfig;
use anyhow::Result;
use chrono::FixedOffset;
use pointage_attendance::LocalAttendanceLog;
use pointage_controllers::ControllerStore;
use pointage_core::{PhysicalTimeEffects, RandomEffects, StorageEffects};
use pointage_effects::{FilesystemStorageHandler, RealRandomHandler, RealTimeHandler};
use std::sync::Arc;
use tracing::debug;

/// Services shared by every command
pub struct PointageRuntime {
    /// Controller registry
    pub store: ControllerStore,
    /// Attendance events
    pub attendance: LocalAttendanceLog,
    /// Wall clock
    pub clock: Arc<dyn PhysicalTimeEffects>,
    /// Offset used for display and "today"
    pub offset: FixedOffset,
    /// PIN options offered by default
    pub option_count: usize,
}

impl PointageRuntime {
    /// Wire production handlers under the configured data directory
    pub fn from_config(config: &PointageConfig) -> Result<Self> {
        let storage: Arc<dyn StorageEffects> =
            Arc::new(FilesystemStorageHandler::new(&config.storage.base_path));
        let random: Arc<dyn RandomEffects> = Arc::new(RealRandomHandler::new());
        let clock: Arc<dyn PhysicalTimeEffects> = Arc::new(RealTimeHandler::new());
        Self::with_handlers(config, storage, random, clock)
    }

    /// Wire the given handlers
    pub fn with_handlers(
        config: &PointageConfig,
        storage: Arc<dyn StorageEffects>,
        random: Arc<dyn RandomEffects>,
        clock: Arc<dyn PhysicalTimeEffects>,
    ) -> Result<Self> {
        let offset = config.display_offset()?;
        debug!(
            base_path = %config.storage.base_path.display(),
            registry_key = %config.storage.registry_key,
            "wiring runtime"
        );

        let store = ControllerStore::builder(
            Arc::clone(&storage),
            Arc::clone(&random),
            Arc::clone(&clock),
        )
        .registry_key(config.storage.registry_key.clone())
        .build();
        let attendance = LocalAttendanceLog::with_key(
            storage,
            Arc::clone(&clock),
            random,
            config.storage.attendance_key.clone(),
        );

        Ok(Self {
            store,
            attendance,
            clock,
            offset,
            option_count: config.passwords.option_count,
        })
    }
}
