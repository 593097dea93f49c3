//! Registry persistence
//!
//! The whole registry lives under one storage key as a JSON array. Loads are
//! forgiving: a missing slot, an unreadable backend, or bytes that are not a
//! JSON array all produce an empty registry. Records that fail to decode or
//! that repeat an agent ID are skipped. Saves always rewrite the whole slot
//! and report failures.

use crate::account::{ControllerAccount, Registry};
use crate::error::{ControllerError, Result};
use pointage_core::StorageEffects;
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key used by the mobile application
pub const DEFAULT_REGISTRY_KEY: &str = "agents_data";

/// Reads and writes the registry through a storage handler
#[derive(Clone)]
pub struct RegistryPersistence {
    storage: Arc<dyn StorageEffects>,
    key: String,
}

impl RegistryPersistence {
    /// Persistence under [`DEFAULT_REGISTRY_KEY`]
    pub fn new(storage: Arc<dyn StorageEffects>) -> Self {
        Self::with_key(storage, DEFAULT_REGISTRY_KEY)
    }

    /// Persistence under a custom key
    pub fn with_key(storage: Arc<dyn StorageEffects>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The storage key holding the registry
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the registry, degrading to empty on any failure
    pub async fn load(&self) -> Registry {
        let bytes = match self.storage.retrieve(&self.key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(key = %self.key, "no persisted registry, starting empty");
                return Registry::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "registry unreadable, starting empty");
                return Registry::new();
            }
        };

        match decode_registry(&bytes) {
            Ok(registry) => {
                debug!(key = %self.key, accounts = registry.len(), "registry loaded");
                registry
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "registry corrupt, starting empty");
                Registry::new()
            }
        }
    }

    /// Overwrite the slot with `registry`
    pub async fn save(&self, registry: &Registry) -> Result<()> {
        let bytes = serde_json::to_vec(registry)
            .map_err(|e| ControllerError::persistence(format!("serialization failed: {e}")))?;
        self.storage.store(&self.key, bytes).await?;
        debug!(key = %self.key, accounts = registry.len(), "registry saved");
        Ok(())
    }

    /// Remove the slot; the next load starts empty
    pub async fn clear(&self) -> Result<()> {
        let existed = self.storage.remove(&self.key).await?;
        debug!(key = %self.key, existed, "registry cleared");
        Ok(())
    }
}

impl std::fmt::Debug for RegistryPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryPersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Decode a persisted registry.
///
/// Fails only when the payload is not a JSON array; individual records that
/// do not decode are skipped with a warning.
pub fn decode_registry(bytes: &[u8]) -> std::result::Result<Registry, serde_json::Error> {
    let records: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;
    let total = records.len();

    let accounts = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            match serde_json::from_value::<ControllerAccount>(record) {
                Ok(account) => Some(account),
                Err(e) => {
                    warn!(index, error = %e, "skipping malformed registry record");
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    let decoded = accounts.len();
    let (registry, dropped) = Registry::from_accounts(accounts);
    if dropped > 0 {
        warn!(dropped, "skipping registry records with duplicate agent IDs");
    }
    if registry.len() < total {
        debug!(total, decoded, kept = registry.len(), "registry partially recovered");
    }
    Ok(registry)
}
