//! Filesystem storage handler
//!
//! Each key is one `<key>.dat` file under the base directory. Writes go to a
//! `<key>.dat.tmp` sibling, are flushed to disk, and are then renamed over the
//! target, so a reader sees either the previous value or the new one.

use async_trait::async_trait;
use pointage_core::effects::{StorageEffects, StorageError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

const DATA_EXTENSION: &str = "dat";
const TEMP_SUFFIX: &str = ".tmp";

/// Filesystem-based storage handler
#[derive(Debug, Clone)]
pub struct FilesystemStorageHandler {
    /// Base directory for storage files
    base_path: PathBuf,
}

impl FilesystemStorageHandler {
    /// Create a new filesystem storage handler rooted at `base_path`
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Directory holding the storage files
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey {
                reason: "Key cannot be empty".to_string(),
            });
        }
        if key.starts_with('.') {
            return Err(StorageError::InvalidKey {
                reason: format!("Key '{key}' cannot start with '.'"),
            });
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(StorageError::InvalidKey {
                reason: format!("Key '{key}' contains characters outside [A-Za-z0-9._-]"),
            });
        }
        Ok(())
    }

    fn file_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        Self::validate_key(key)?;
        Ok(self.base_path.join(format!("{key}.{DATA_EXTENSION}")))
    }

    async fn write_atomically(&self, target: &Path, value: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create directory: {e}"))
        })?;

        let mut temp = target.as_os_str().to_owned();
        temp.push(TEMP_SUFFIX);
        let temp = PathBuf::from(temp);

        let mut file = fs::File::create(&temp)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("Failed to create temp file: {e}")))?;
        file.write_all(value)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("Failed to write file: {e}")))?;
        file.sync_all()
            .await
            .map_err(|e| StorageError::WriteFailed(format!("Failed to sync file: {e}")))?;
        drop(file);

        if let Err(e) = fs::rename(&temp, target).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StorageError::WriteFailed(format!(
                "Failed to move file into place: {e}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl StorageEffects for FilesystemStorageHandler {
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let path = self.file_path(key)?;
        self.write_atomically(&path, &value).await?;
        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.file_path(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed(format!(
                "Failed to read file: {e}"
            ))),
        }
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.file_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to remove file: {e}"
            ))),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.file_path(key)?;
        fs::try_exists(&path)
            .await
            .map_err(|e| StorageError::ReadFailed(format!("Failed to stat file: {e}")))
    }

    async fn list_keys(&self, prefix: Option<&str>) -> Result<Vec<String>, StorageError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::ReadFailed(format!(
                    "Failed to read directory: {e}"
                )))
            }
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read directory entry: {e}"))
        })? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(DATA_EXTENSION) {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if prefix.map_or(true, |p| key.starts_with(p)) {
                keys.push(key.to_string());
            }
        }

        keys.sort();
        Ok(keys)
    }
}
