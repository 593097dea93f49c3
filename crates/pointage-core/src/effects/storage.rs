//! Storage effect interface
//!
//! A flat key-value namespace of byte blobs. Every `store` replaces the whole
//! value under its key; handlers must make that replacement atomic from the
//! point of view of a later `retrieve`.

use async_trait::async_trait;

/// Errors from storage handlers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The key cannot be used by this handler
    #[error("Invalid storage key: {reason}")]
    InvalidKey {
        /// Why the key was rejected
        reason: String,
    },
    /// Reading failed
    #[error("Storage read failed: {0}")]
    ReadFailed(String),
    /// Writing failed
    #[error("Storage write failed: {0}")]
    WriteFailed(String),
    /// Deleting failed
    #[error("Storage delete failed: {0}")]
    DeleteFailed(String),
}

/// Durable key-value storage
#[async_trait]
pub trait StorageEffects: Send + Sync {
    /// Store `value` under `key`, fully replacing any previous value
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

    /// Retrieve the value under `key`, `None` if absent
    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Remove `key`, returning whether it existed
    async fn remove(&self, key: &str) -> Result<bool, StorageError>;

    /// Whether `key` currently holds a value
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.retrieve(key).await?.is_some())
    }

    /// List keys, optionally restricted to a prefix, sorted
    async fn list_keys(&self, prefix: Option<&str>) -> Result<Vec<String>, StorageError>;
}
