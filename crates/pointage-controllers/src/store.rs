//! The controller store
//!
//! [`ControllerStore`] owns the in-memory registry and keeps it reconciled with
//! persistence:
//!
//! - The registry is loaded lazily on first use (or by [`ControllerStore::initialize`])
//!   under the store mutex, so concurrent first callers share one load.
//! - Every operation holds the mutex for its whole read-modify-write, so calls
//!   are serialized.
//! - A mutation saves a modified copy first and swaps it into memory only
//!   once the save succeeded.
//! - Mutations run on a spawned task. A caller that stops waiting (for example
//!   a login screen timing out) does not cancel the commit.
//!
//! Accounts move one way, `Active -> Inactive`. Nothing re-activates them.

use crate::account::{AccountStatus, AccountSummary, ControllerAccount, Registry};
use crate::allocator;
use crate::error::{ControllerError, Result};
use crate::passwords::PasswordGenerator;
use crate::persistence::{RegistryPersistence, DEFAULT_REGISTRY_KEY};
use pointage_core::{
    is_four_digits, AgentId, ChecksumHasher, CredentialHasher, FormatError, PhysicalTimeEffects,
    Pin, RandomEffects, StorageEffects,
};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Compared against when the agent ID is unknown. Checksum digests never
/// carry a leading zero, so this cannot match.
const UNKNOWN_ACCOUNT_DIGEST: &str = "0000000";

/// Opaque id draws before `create` gives up on a collision-free id
const MAX_ID_DRAWS: usize = 16;

/// Fields to change on an existing account
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerUpdate {
    /// New display name
    pub name: Option<String>,
    /// New raw PIN, hashed before storage
    pub password: Option<String>,
}

impl ControllerUpdate {
    /// An update that changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the display name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Change the PIN
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// Snapshot of the store for troubleshooting. Contains no digests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDiagnostics {
    /// Whether the registry had been loaded before this call
    pub initialized: bool,
    /// Storage key of the registry
    pub storage_key: String,
    /// Accounts, active or not
    pub account_count: usize,
    /// Accounts able to log in
    pub active_count: usize,
    /// One line per account, sorted by agent ID
    pub accounts: Vec<AccountSummary>,
}

#[derive(Debug, Default)]
struct RegistryState {
    loaded: bool,
    registry: Registry,
}

struct StoreInner {
    persistence: RegistryPersistence,
    hasher: Arc<dyn CredentialHasher>,
    random: Arc<dyn RandomEffects>,
    clock: Arc<dyn PhysicalTimeEffects>,
    passwords: PasswordGenerator,
    state: Mutex<RegistryState>,
}

/// Builder for [`ControllerStore`]
pub struct ControllerStoreBuilder {
    storage: Arc<dyn StorageEffects>,
    random: Arc<dyn RandomEffects>,
    clock: Arc<dyn PhysicalTimeEffects>,
    hasher: Arc<dyn CredentialHasher>,
    registry_key: String,
}

impl ControllerStoreBuilder {
    /// Replace the default [`ChecksumHasher`]
    pub fn hasher(mut self, hasher: Arc<dyn CredentialHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Store the registry under `key` instead of [`DEFAULT_REGISTRY_KEY`]
    pub fn registry_key(mut self, key: impl Into<String>) -> Self {
        self.registry_key = key.into();
        self
    }

    /// Assemble the store. Nothing is loaded until first use.
    pub fn build(self) -> ControllerStore {
        let passwords = PasswordGenerator::new(Arc::clone(&self.random));
        ControllerStore {
            inner: Arc::new(StoreInner {
                persistence: RegistryPersistence::with_key(self.storage, self.registry_key),
                hasher: self.hasher,
                random: self.random,
                clock: self.clock,
                passwords,
                state: Mutex::new(RegistryState::default()),
            }),
        }
    }
}

/// Registry of controller accounts backed by persistent storage
///
/// Cloning is cheap and yields a handle to the same registry.
#[derive(Clone)]
pub struct ControllerStore {
    inner: Arc<StoreInner>,
}

impl ControllerStore {
    /// Store with the default hasher and registry key
    pub fn new(
        storage: Arc<dyn StorageEffects>,
        random: Arc<dyn RandomEffects>,
        clock: Arc<dyn PhysicalTimeEffects>,
    ) -> Self {
        Self::builder(storage, random, clock).build()
    }

    /// Start configuring a store
    pub fn builder(
        storage: Arc<dyn StorageEffects>,
        random: Arc<dyn RandomEffects>,
        clock: Arc<dyn PhysicalTimeEffects>,
    ) -> ControllerStoreBuilder {
        ControllerStoreBuilder {
            storage,
            random,
            clock,
            hasher: Arc::new(ChecksumHasher::new()),
            registry_key: DEFAULT_REGISTRY_KEY.to_string(),
        }
    }

    /// Load the registry if that has not happened yet. Idempotent.
    pub async fn initialize(&self) {
        let _state = self.inner.lock_loaded().await;
    }

    /// Discard the in-memory registry and load it again from storage
    pub async fn reload(&self) {
        let mut state = self.inner.state.lock().await;
        state.loaded = false;
        self.inner.ensure_loaded(&mut state).await;
    }

    /// Whether the registry has been loaded
    pub async fn is_initialized(&self) -> bool {
        self.inner.state.lock().await.loaded
    }

    /// Create an active account and return its opaque id.
    ///
    /// Both credentials must be exactly four digits and the agent ID must not
    /// be used by any account, active or deactivated.
    pub async fn create(&self, agent_id: &str, password: &str, name: &str) -> Result<String> {
        let agent_id = AgentId::parse(agent_id)?;
        let pin = Pin::parse(password)?;
        let name = name.to_string();
        self.detached(move |inner| async move { inner.create(agent_id, pin, name).await })
            .await
    }

    /// Check a login attempt. Never errors: anything other than an active
    /// account with a matching PIN is `false`.
    pub async fn authenticate(&self, agent_id: &str, password: &str) -> bool {
        let (Ok(agent_id), Ok(pin)) = (AgentId::parse(agent_id), Pin::parse(password)) else {
            debug!("authentication rejected");
            return false;
        };

        let state = self.inner.lock_loaded().await;
        let candidate = self.inner.hasher.digest(pin.expose());
        let (stored, active) = match state.registry.find(&agent_id) {
            Some(account) => (account.password_digest.as_str(), account.is_active),
            None => (UNKNOWN_ACCOUNT_DIGEST, false),
        };
        let digest_matches: bool = candidate.as_bytes().ct_eq(stored.as_bytes()).into();

        if digest_matches & active {
            info!(agent_id = %agent_id, "controller authenticated");
            true
        } else {
            debug!("authentication rejected");
            false
        }
    }

    /// Every account, active or not, sorted by agent ID
    pub async fn get_all(&self) -> Vec<ControllerAccount> {
        let state = self.inner.lock_loaded().await;
        state.registry.sorted()
    }

    /// Public status of one account, `None` if the agent ID is unknown
    pub async fn lookup(&self, agent_id: &str) -> Option<AccountStatus> {
        let agent_id = AgentId::parse(agent_id).ok()?;
        let state = self.inner.lock_loaded().await;
        state.registry.find(&agent_id).map(ControllerAccount::status)
    }

    /// Change the name and/or PIN of an account.
    ///
    /// The agent ID, opaque id, creation time and active flag are never
    /// touched.
    pub async fn update(&self, agent_id: &str, changes: ControllerUpdate) -> Result<()> {
        let raw_id = agent_id.to_string();
        let agent_id = AgentId::parse(agent_id).map_err(|_| ControllerError::not_found(raw_id))?;
        let pin = changes.password.as_deref().map(Pin::parse);
        let name = changes.name;
        self.detached(move |inner| async move { inner.update(agent_id, name, pin).await })
            .await
    }

    /// Soft-delete an account. Deactivating twice is not an error.
    pub async fn deactivate(&self, agent_id: &str) -> Result<()> {
        let raw_id = agent_id.to_string();
        let agent_id = AgentId::parse(agent_id).map_err(|_| ControllerError::not_found(raw_id))?;
        self.detached(move |inner| async move { inner.deactivate(agent_id).await })
            .await
    }

    /// Next free agent ID over every account, active or not
    pub async fn generate_unique_agent_id(&self) -> Result<String> {
        let state = self.inner.lock_loaded().await;
        let id = allocator::allocate_agent_id(&state.registry.agent_numbers())?;
        Ok(id.to_string())
    }

    /// First free agent ID in a department's numbering band
    pub async fn suggest_agent_id(&self, department: &str) -> Result<String> {
        let state = self.inner.lock_loaded().await;
        let id = allocator::suggest_agent_id(department, &state.registry.agent_numbers())?;
        Ok(id.to_string())
    }

    /// Up to `count` distinct candidate PINs
    pub async fn generate_password_options(&self, count: usize) -> Vec<String> {
        self.inner.passwords.generate_options(count).await
    }

    /// Hash any digest that is still a raw 4-digit PIN. Returns how many
    /// accounts were fixed.
    pub async fn repair_digests(&self) -> Result<usize> {
        self.detached(|inner| async move { inner.repair_digests().await })
            .await
    }

    /// Troubleshooting snapshot
    pub async fn diagnostics(&self) -> StoreDiagnostics {
        let mut state = self.inner.state.lock().await;
        let initialized = state.loaded;
        self.inner.ensure_loaded(&mut state).await;
        StoreDiagnostics {
            initialized,
            storage_key: self.inner.persistence.key().to_string(),
            account_count: state.registry.len(),
            active_count: state.registry.active_count(),
            accounts: state
                .registry
                .sorted()
                .iter()
                .map(ControllerAccount::summary)
                .collect(),
        }
    }

    /// Drop every account from memory and storage. For resets only.
    pub async fn clear_all(&self) -> Result<()> {
        self.detached(|inner| async move { inner.clear_all().await })
            .await
    }

    /// Run a mutation on its own task so it commits even if the caller stops
    /// waiting.
    async fn detached<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: FnOnce(Arc<StoreInner>) -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let handle = tokio::spawn(op(Arc::clone(&self.inner)));
        handle.await.map_err(|e| ControllerError::Interrupted {
            reason: e.to_string(),
        })?
    }
}

impl std::fmt::Debug for ControllerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerStore")
            .field("persistence", &self.inner.persistence)
            .finish_non_exhaustive()
    }
}

impl StoreInner {
    async fn ensure_loaded(&self, state: &mut RegistryState) {
        if state.loaded {
            return;
        }
        state.registry = self.persistence.load().await;
        state.loaded = true;
        self.remint_duplicate_ids(state).await;
        info!(
            accounts = state.registry.len(),
            active = state.registry.active_count(),
            "controller registry initialized"
        );
    }

    /// Give every account whose opaque id repeats an earlier one a fresh id.
    ///
    /// Two stores with the same random seed over one storage key can mint the
    /// same id. Both records are kept; the later ones are re-keyed and the
    /// result written back best-effort.
    async fn remint_duplicate_ids(&self, state: &mut RegistryState) {
        let positions = state.registry.repeated_id_positions();
        if positions.is_empty() {
            return;
        }
        let mut reminted = 0usize;
        for index in positions {
            let registry = &state.registry;
            let Some(fresh) = self.fresh_id(|candidate| registry.contains_id(candidate)).await
            else {
                warn!(index, "no unused opaque id, duplicate left in place");
                continue;
            };
            if let Some(old) = state.registry.rekey(index, fresh.clone()) {
                warn!(old = %old, new = %fresh, "duplicate account id re-minted");
                reminted += 1;
            }
        }
        if reminted > 0 {
            if let Err(error) = self.persistence.save(&state.registry).await {
                warn!(%error, reminted, "re-minted ids not persisted");
            }
        }
    }

    /// Draw random opaque ids until one is not taken, at most
    /// [`MAX_ID_DRAWS`] times.
    async fn fresh_id(&self, is_taken: impl Fn(&str) -> bool) -> Option<String> {
        for _ in 0..MAX_ID_DRAWS {
            let id = uuid::Builder::from_random_bytes(self.random.random_bytes_16().await)
                .into_uuid()
                .to_string();
            if !is_taken(&id) {
                return Some(id);
            }
            debug!(id = %id, "opaque id already taken, drawing again");
        }
        None
    }

    async fn lock_loaded(&self) -> MutexGuard<'_, RegistryState> {
        let mut state = self.state.lock().await;
        self.ensure_loaded(&mut state).await;
        state
    }

    /// Persist `next` and make it the in-memory registry
    async fn commit(&self, state: &mut RegistryState, next: Registry) -> Result<()> {
        self.persistence.save(&next).await?;
        state.registry = next;
        Ok(())
    }

    async fn create(&self, agent_id: AgentId, pin: Pin, name: String) -> Result<String> {
        let mut state = self.lock_loaded().await;
        if state.registry.contains_agent_id(&agent_id) {
            debug!(agent_id = %agent_id, "create rejected, agent ID in use");
            return Err(ControllerError::DuplicateId {
                agent_id: agent_id.to_string(),
            });
        }

        let registry = &state.registry;
        let Some(id) = self.fresh_id(|candidate| registry.contains_id(candidate)).await else {
            warn!(agent_id = %agent_id, attempts = MAX_ID_DRAWS, "create failed, no unused opaque id");
            return Err(ControllerError::IdCollision {
                attempts: MAX_ID_DRAWS,
            });
        };
        let account = ControllerAccount {
            id: id.clone(),
            agent_id: agent_id.clone(),
            password_digest: self.hasher.digest(pin.expose()),
            name,
            is_active: true,
            created_at: self.clock.physical_time().await.to_datetime(),
        };

        let mut next = state.registry.clone();
        next.push(account);
        self.commit(&mut state, next).await?;

        info!(agent_id = %agent_id, total = state.registry.len(), "controller created");
        Ok(id)
    }

    async fn update(
        &self,
        agent_id: AgentId,
        name: Option<String>,
        pin: Option<std::result::Result<Pin, FormatError>>,
    ) -> Result<()> {
        let mut state = self.lock_loaded().await;
        if !state.registry.contains_agent_id(&agent_id) {
            return Err(ControllerError::not_found(agent_id.to_string()));
        }
        let digest = pin
            .transpose()?
            .map(|pin| self.hasher.digest(pin.expose()));

        let mut next = state.registry.clone();
        if let Some(account) = next.find_mut(&agent_id) {
            if let Some(name) = name {
                account.name = name;
            }
            if let Some(digest) = digest {
                account.password_digest = digest;
            }
        }
        self.commit(&mut state, next).await?;

        info!(agent_id = %agent_id, "controller updated");
        Ok(())
    }

    async fn deactivate(&self, agent_id: AgentId) -> Result<()> {
        let mut state = self.lock_loaded().await;
        let Some(account) = state.registry.find(&agent_id) else {
            return Err(ControllerError::not_found(agent_id.to_string()));
        };
        if !account.is_active {
            debug!(agent_id = %agent_id, "controller already inactive");
            return Ok(());
        }

        let mut next = state.registry.clone();
        if let Some(account) = next.find_mut(&agent_id) {
            account.is_active = false;
        }
        self.commit(&mut state, next).await?;

        info!(agent_id = %agent_id, "controller deactivated");
        Ok(())
    }

    async fn repair_digests(&self) -> Result<usize> {
        let mut state = self.lock_loaded().await;
        let mut next = state.registry.clone();
        let mut repaired = 0;
        for account in next.accounts_mut() {
            if is_four_digits(&account.password_digest) {
                warn!(agent_id = %account.agent_id, "stored digest is a raw PIN, rehashing");
                account.password_digest = self.hasher.digest(&account.password_digest);
                repaired += 1;
            }
        }

        if repaired > 0 {
            self.commit(&mut state, next).await?;
            info!(repaired, "controller digests repaired");
        } else {
            debug!("no raw PIN digests found");
        }
        Ok(repaired)
    }

    async fn clear_all(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        self.persistence.clear().await?;
        state.registry = Registry::new();
        state.loaded = true;
        warn!("controller registry cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pointage_core::CredentialField;
    use pointage_testkit::{
        MemoryStorageHandler, MockRandomHandler, MockTimeHandler, ScriptedRandomHandler,
    };

    fn store() -> ControllerStore {
        ControllerStore::new(
            Arc::new(MemoryStorageHandler::new()),
            Arc::new(MockRandomHandler::deterministic()),
            Arc::new(MockTimeHandler::new()),
        )
    }

    #[tokio::test]
    async fn test_create_validates_format() {
        let store = store();
        assert_matches!(
            store.create("101", "4821", "Alice").await,
            Err(ControllerError::InvalidFormat {
                field: CredentialField::AgentId
            })
        );
        assert_matches!(
            store.create("1001", "48a1", "Alice").await,
            Err(ControllerError::InvalidFormat {
                field: CredentialField::Password
            })
        );
        assert!(store.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_stores_digest_not_pin() {
        let store = store();
        let id = store.create("1001", "4821", "Alice").await.unwrap();
        let accounts = store.get_all().await;
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, id);
        assert_eq!(accounts[0].password_digest, "1604547");
        assert!(accounts[0].is_active);
        assert_eq!(accounts[0].created_at.timestamp_millis(), 1_640_995_200_000);
    }

    #[tokio::test]
    async fn test_opaque_ids_are_unique() {
        let store = store();
        let a = store.create("1001", "4821", "Alice").await.unwrap();
        let b = store.create("1002", "5930", "Bob").await.unwrap();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(&a).is_ok());
    }

    #[tokio::test]
    async fn test_create_fails_when_every_id_is_taken() {
        let store = ControllerStore::new(
            Arc::new(MemoryStorageHandler::new()),
            Arc::new(ScriptedRandomHandler::constant(0).with_fixed_bytes(7)),
            Arc::new(MockTimeHandler::new()),
        );
        store.create("1001", "4821", "Alice").await.unwrap();
        assert_matches!(
            store.create("1002", "5930", "Bob").await,
            Err(ControllerError::IdCollision { attempts: MAX_ID_DRAWS })
        );
        assert_eq!(store.get_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_load_remints_repeated_ids() {
        let storage = MemoryStorageHandler::new();
        let raw = serde_json::json!([
            {"id": "same", "agentId": "1001", "password": "1604547", "name": "Alice",
             "isActive": true, "createdAt": "2024-05-01T08:30:00Z"},
            {"id": "same", "agentId": "1002", "password": "1604547", "name": "Bob",
             "isActive": true, "createdAt": "2024-05-01T08:31:00Z"}
        ]);
        storage
            .store(DEFAULT_REGISTRY_KEY, serde_json::to_vec(&raw).unwrap())
            .await
            .unwrap();
        let store = ControllerStore::new(
            Arc::new(storage.clone()),
            Arc::new(MockRandomHandler::deterministic()),
            Arc::new(MockTimeHandler::new()),
        );

        let accounts = store.get_all().await;
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].id, "same");
        assert_ne!(accounts[1].id, "same");

        // The re-keyed registry was written back
        let saved = storage.retrieve(DEFAULT_REGISTRY_KEY).await.unwrap().unwrap();
        let saved: serde_json::Value = serde_json::from_slice(&saved).unwrap();
        assert_eq!(saved[1]["id"].as_str(), Some(accounts[1].id.as_str()));
    }

    #[tokio::test]
    async fn test_update_changes_name_and_pin_only() {
        let store = store();
        store.create("1001", "4821", "Alice").await.unwrap();
        let before = store.get_all().await.remove(0);

        store
            .update("1001", ControllerUpdate::new().name("Alice M.").password("5930"))
            .await
            .unwrap();

        let after = store.get_all().await.remove(0);
        assert_eq!(after.name, "Alice M.");
        assert_ne!(after.password_digest, before.password_digest);
        assert_eq!(after.id, before.id);
        assert_eq!(after.agent_id, before.agent_id);
        assert_eq!(after.created_at, before.created_at);
        assert!(store.authenticate("1001", "5930").await);
        assert!(!store.authenticate("1001", "4821").await);
    }

    #[tokio::test]
    async fn test_update_errors() {
        let store = store();
        store.create("1001", "4821", "Alice").await.unwrap();
        assert_matches!(
            store.update("1002", ControllerUpdate::new().name("X")).await,
            Err(ControllerError::NotFound { .. })
        );
        assert_matches!(
            store.update("abc", ControllerUpdate::new().name("X")).await,
            Err(ControllerError::NotFound { .. })
        );
        assert_matches!(
            store.update("1001", ControllerUpdate::new().password("12")).await,
            Err(ControllerError::InvalidFormat {
                field: CredentialField::Password
            })
        );
        // Unknown agent wins over a malformed PIN
        assert_matches!(
            store.update("1009", ControllerUpdate::new().password("12")).await,
            Err(ControllerError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn test_update_does_not_reactivate() {
        let store = store();
        store.create("1001", "4821", "Alice").await.unwrap();
        store.deactivate("1001").await.unwrap();
        store
            .update("1001", ControllerUpdate::new().password("5930"))
            .await
            .unwrap();
        assert!(!store.get_all().await[0].is_active);
        assert!(!store.authenticate("1001", "5930").await);
    }

    #[tokio::test]
    async fn test_deactivate_is_idempotent() {
        let store = store();
        store.create("1001", "4821", "Alice").await.unwrap();
        store.deactivate("1001").await.unwrap();
        store.deactivate("1001").await.unwrap();
        assert_matches!(
            store.deactivate("1002").await,
            Err(ControllerError::NotFound { .. })
        );
        let status = store.lookup("1001").await.unwrap();
        assert!(!status.is_active);
        assert_eq!(status.name, "Alice");
    }

    #[tokio::test]
    async fn test_authenticate_rejects_malformed_input() {
        let store = store();
        store.create("1001", "4821", "Alice").await.unwrap();
        for (id, pin) in [("", "4821"), ("1001", ""), ("1001", "482"), ("10010", "4821"), ("1001", "48 1")] {
            assert!(!store.authenticate(id, pin).await, "{id:?}/{pin:?}");
        }
    }

    #[tokio::test]
    async fn test_lookup_unknown() {
        let store = store();
        assert!(store.lookup("1001").await.is_none());
        assert!(store.lookup("garbage").await.is_none());
    }

    #[tokio::test]
    async fn test_generated_ids_and_options() {
        let store = store();
        assert_eq!(store.generate_unique_agent_id().await.unwrap(), "1001");
        store.create("1001", "4821", "Alice").await.unwrap();
        store.deactivate("1001").await.unwrap();
        // Inactive accounts still hold their ID
        assert_eq!(store.generate_unique_agent_id().await.unwrap(), "1002");
        assert_eq!(store.suggest_agent_id("rh").await.unwrap(), "2001");
        assert_eq!(store.generate_password_options(3).await.len(), 3);
    }

    #[tokio::test]
    async fn test_diagnostics_hide_digests() {
        let store = store();
        let first = store.diagnostics().await;
        assert!(!first.initialized);
        assert_eq!(first.storage_key, DEFAULT_REGISTRY_KEY);

        store.create("1002", "4821", "Bob").await.unwrap();
        store.create("1001", "5930", "Alice").await.unwrap();
        store.deactivate("1002").await.unwrap();

        let diag = store.diagnostics().await;
        assert!(diag.initialized);
        assert_eq!(diag.account_count, 2);
        assert_eq!(diag.active_count, 1);
        assert_eq!(diag.accounts[0].agent_id.as_str(), "1001");
        assert!(diag.accounts.iter().all(|a| a.has_password));
        let json = serde_json::to_string(&diag).unwrap();
        assert!(!json.contains("1604547"));
    }
}
