//! File system repository

use crate::error::{DiaryError, Result};
use crate::infrastructure::config::DIARY_DIR;
use crate::infrastructure::{Config, EntryStore, FileKeyValueStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at a diary root
pub const ROOT_ENV: &str = "PODIARY_ROOT";

/// Abstract repository for diary operations
pub trait DiaryRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .podiary/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .podiary/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .podiary directory exists
    fn is_initialized(&self) -> bool;

    /// Create .podiary directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of DiaryRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Locate the diary for this process.
    ///
    /// A set `PODIARY_ROOT` must name an initialized diary. Otherwise the
    /// nearest ancestor of the working directory holding `.podiary/` is used.
    pub fn discover() -> Result<Self> {
        match std::env::var_os(ROOT_ENV) {
            Some(root) => Self::from_env_root(PathBuf::from(root)),
            None => Self::discover_from(&std::env::current_dir()?),
        }
    }

    fn from_env_root(root: PathBuf) -> Result<Self> {
        if !Self::has_diary_dir(&root) {
            return Err(DiaryError::Config(format!(
                "{} points to '{}', which has no {} directory. \
                Run 'podiary init' there or unset {}.",
                ROOT_ENV,
                root.display(),
                DIARY_DIR,
                ROOT_ENV
            )));
        }
        Ok(Self::new(root))
    }

    /// Nearest ancestor of `start`, itself included, that holds a diary
    pub fn discover_from(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| Self::has_diary_dir(dir))
            .map(|dir| Self::new(dir.to_path_buf()))
            .ok_or_else(|| DiaryError::NotDiaryDirectory(start.to_path_buf()))
    }

    fn has_diary_dir(path: &Path) -> bool {
        path.join(DIARY_DIR).is_dir()
    }

    /// Directory holding the key-value storage files
    pub fn storage_dir(&self) -> PathBuf {
        self.root.join(DIARY_DIR).join("storage")
    }

    /// Key-value store for this diary, honouring the configured quota
    pub fn key_value_store(&self) -> Result<FileKeyValueStore> {
        let config = self.load_config()?;
        Ok(FileKeyValueStore::new(self.storage_dir()).with_quota(config.storage_quota))
    }

    /// Load the entry store for this diary
    pub fn entry_store(&self) -> Result<EntryStore<FileKeyValueStore>> {
        Ok(EntryStore::load(self.key_value_store()?))
    }
}

impl DiaryRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_diary_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let diary_dir = self.root.join(DIARY_DIR);

        if diary_dir.exists() {
            return Err(DiaryError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&diary_dir)?;
        fs::create_dir(self.storage_dir())?;
        Ok(())
    }
}
