//! CLI configuration
//!
//! Loaded from TOML. Every section and field is optional; anything missing
//! takes its default, and a missing file is the all-defaults configuration.

use anyhow::{Context, Result};
use chrono::FixedOffset;
use pointage_attendance::{utc_offset, DEFAULT_ATTENDANCE_KEY};
use pointage_controllers::{passwords::DEFAULT_OPTION_COUNT, DEFAULT_REGISTRY_KEY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolve the default data directory.
///
/// Priority:
/// 1. `$POINTAGE_PATH/.pointage` if POINTAGE_PATH is set
/// 2. `~/.pointage` (home directory)
/// 3. `./.pointage` (current directory fallback)
pub fn default_storage_path() -> PathBuf {
    std::env::var("POINTAGE_PATH")
        .ok()
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pointage")
}

/// `config.toml` inside the default data directory
pub fn default_config_path() -> PathBuf {
    default_storage_path().join("config.toml")
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointageConfig {
    /// Where data lives
    pub storage: StorageConfig,
    /// Log output
    pub logging: LoggingConfig,
    /// PIN generation
    pub passwords: PasswordConfig,
    /// Date and time rendering
    pub display: DisplayConfig,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base storage directory
    pub base_path: PathBuf,
    /// Key of the controller registry
    pub registry_key: String,
    /// Key of the attendance log
    pub attendance_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: default_storage_path(),
            registry_key: DEFAULT_REGISTRY_KEY.to_string(),
            attendance_key: DEFAULT_ATTENDANCE_KEY.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// PIN generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// Options offered by `controller passwords`
    pub option_count: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            option_count: DEFAULT_OPTION_COUNT,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Local time offset in minutes east of UTC
    pub utc_offset_minutes: i32,
}

impl PointageConfig {
    /// Load from `path`, or defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.display_offset()?;
        Ok(config)
    }

    /// Write to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        std::fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }

    /// Pretty TOML rendering
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// The configured display offset
    pub fn display_offset(&self) -> Result<FixedOffset> {
        utc_offset(self.display.utc_offset_minutes).with_context(|| {
            format!(
                "display.utc_offset_minutes out of range: {}",
                self.display.utc_offset_minutes
            )
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = PointageConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, PointageConfig::default());
        assert_eq!(config.storage.registry_key, "agents_data");
        assert_eq!(config.storage.attendance_key, "attendance_log");
        assert_eq!(config.passwords.option_count, 3);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\nbase_path = \"/var/lib/pointage\"\n\n[display]\nutc_offset_minutes = 120\n",
        )
        .unwrap();

        let config = PointageConfig::load(&path).unwrap();
        assert_eq!(config.storage.base_path, PathBuf::from("/var/lib/pointage"));
        assert_eq!(config.storage.registry_key, "agents_data");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.display_offset().unwrap().local_minus_utc(), 7200);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = PointageConfig::default();
        config.storage.base_path = dir.path().to_path_buf();
        config.passwords.option_count = 5;

        config.save(&path).unwrap();
        assert_eq!(PointageConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "[display]\nutc_offset_minutes = 5000\n").unwrap();
        assert!(PointageConfig::load(&path).is_err());

        std::fs::write(&path, "[storage\n").unwrap();
        assert!(PointageConfig::load(&path).is_err());
    }
}
