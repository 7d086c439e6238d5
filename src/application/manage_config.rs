//! Config management use case

use crate::error::{DiaryError, Result};
use crate::infrastructure::{Config, DiaryRepository, FileSystemRepository};

/// Keys accepted by `podiary config`
pub const CONFIG_KEYS: &str = "archive_name, jpeg_quality, storage_quota, created";

/// Service for managing diary configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "archive_name" => Ok(config.archive_name),
            "jpeg_quality" => Ok(config.jpeg_quality.to_string()),
            "storage_quota" => Ok(config
                .storage_quota
                .map(|q| q.to_string())
                .unwrap_or_else(|| "none".to_string())),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(DiaryError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, CONFIG_KEYS
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "archive_name" => {
                config.archive_name = value.trim().to_string();
            }
            "jpeg_quality" => {
                config.jpeg_quality = value.trim().parse().map_err(|_| {
                    DiaryError::Config(format!("Invalid jpeg_quality: '{}'", value))
                })?;
            }
            "storage_quota" => {
                config.storage_quota = match value.trim() {
                    "none" | "" => None,
                    v => Some(v.parse().map_err(|_| {
                        DiaryError::Config(format!(
                            "Invalid storage_quota: '{}' (expected bytes or 'none')",
                            value
                        ))
                    })?),
                };
            }
            "created" => {
                return Err(DiaryError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(DiaryError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: archive_name, jpeg_quality, storage_quota",
                    key
                )));
            }
        }

        self.repository.save_config(&config)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
