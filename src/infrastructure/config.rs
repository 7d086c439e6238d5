//! Configuration management

use crate::error::{DiaryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the per-diary metadata directory
pub const DIARY_DIR: &str = ".podiary";

pub const DEFAULT_ARCHIVE_NAME: &str = "PO_Diario.zip";
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

fn default_archive_name() -> String {
    DEFAULT_ARCHIVE_NAME.to_string()
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// File name used by `export` when no output path is given
    #[serde(default = "default_archive_name")]
    pub archive_name: String,

    /// JPEG quality (1-100) for captured frames
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Maximum size in bytes of a single persisted value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_quota: Option<u64>,

    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            archive_name: default_archive_name(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            storage_quota: None,
            created: Utc::now(),
        }
    }

    /// Load config from .podiary/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(DIARY_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DiaryError::NotDiaryDirectory(path.to_path_buf())
            } else {
                DiaryError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| DiaryError::Config(format!("Failed to parse config.toml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to .podiary/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let diary_dir = path.join(DIARY_DIR);
        let config_path = diary_dir.join("config.toml");

        if !diary_dir.exists() {
            fs::create_dir(&diary_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(DiaryError::Config(format!(
                "Invalid jpeg_quality: {} (must be between 1 and 100)",
                self.jpeg_quality
            )));
        }
        if self.archive_name.trim().is_empty() {
            return Err(DiaryError::Config(
                "archive_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
