//! In-memory and fault-injecting storage handlers

use async_trait::async_trait;
use pointage_core::effects::{StorageEffects, StorageError};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// In-memory storage handler for testing
#[derive(Debug, Clone, Default)]
pub struct MemoryStorageHandler {
    data: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStorageHandler {
    /// Create an empty memory storage handler
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler pre-populated with one value
    pub fn with_value(key: &str, value: impl Into<Vec<u8>>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(key.to_string(), value.into());
        Self {
            data: Arc::new(RwLock::new(map)),
        }
    }

    /// Raw bytes under `key`, bypassing the effect interface
    pub async fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.data.read().await.get(key).cloned()
    }

    /// Overwrite the raw bytes under `key`
    pub async fn put_raw(&self, key: &str, value: impl Into<Vec<u8>>) {
        self.data.write().await.insert(key.to_string(), value.into());
    }
}

#[async_trait]
impl StorageEffects for MemoryStorageHandler {
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let mut data = self.data.write().await;
        data.insert(key.to_string(), value);
        Ok(())
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let data = self.data.read().await;
        Ok(data.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut data = self.data.write().await;
        Ok(data.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let data = self.data.read().await;
        Ok(data.contains_key(key))
    }

    async fn list_keys(&self, prefix: Option<&str>) -> Result<Vec<String>, StorageError> {
        let data = self.data.read().await;
        Ok(data
            .keys()
            .filter(|k| prefix.map_or(true, |p| k.starts_with(p)))
            .cloned()
            .collect())
    }
}

/// Storage wrapper that injects failures and latency
///
/// Counts reads and writes so tests can assert how often the backend was hit.
#[derive(Debug, Default)]
pub struct FaultyStorage<S> {
    inner: S,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_delay_ms: AtomicUsize,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl<S: StorageEffects> FaultyStorage<S> {
    /// Wrap `inner` with all faults disabled
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            write_delay_ms: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent retrieve fail
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent store/remove fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Sleep before every store/remove
    pub fn set_write_delay(&self, delay: Duration) {
        let ms = usize::try_from(delay.as_millis()).unwrap_or(usize::MAX);
        self.write_delay_ms.store(ms, Ordering::SeqCst);
    }

    /// Number of retrieve calls seen
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of store/remove calls seen, including failed ones
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// The wrapped handler
    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn before_write(&self) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let delay = self.write_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay as u64)).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteFailed("injected write failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl<S: StorageEffects> StorageEffects for FaultyStorage<S> {
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        self.before_write().await?;
        self.inner.store(key, value).await
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        // Yield so concurrent loaders genuinely overlap
        tokio::task::yield_now().await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::ReadFailed("injected read failure".into()));
        }
        self.inner.retrieve(key).await
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        self.before_write().await?;
        self.inner.remove(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.inner.exists(key).await
    }

    async fn list_keys(&self, prefix: Option<&str>) -> Result<Vec<String>, StorageError> {
        self.inner.list_keys(prefix).await
    }
}
