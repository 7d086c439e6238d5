//! String-keyed persistent storage

use crate::error::{DiaryError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Durable string values addressed by key
pub trait KeyValueStore {
    /// Read a value, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a value; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

fn check_quota(quota: Option<u64>, key: &str, value: &str) -> Result<()> {
    match quota {
        Some(limit) if value.len() as u64 > limit => Err(DiaryError::Persistence(format!(
            "storage quota exceeded writing '{}' ({} bytes, limit {} bytes)",
            key,
            value.len(),
            limit
        ))),
        _ => Ok(()),
    }
}

/// One file per key inside a storage directory
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
    quota: Option<u64>,
}

impl FileKeyValueStore {
    pub fn new(dir: PathBuf) -> Self {
        FileKeyValueStore { dir, quota: None }
    }

    /// Limit the size in bytes of any single stored value
    pub fn with_quota(mut self, quota: Option<u64>) -> Self {
        self.quota = quota;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(DiaryError::Persistence(format!(
                "invalid storage key: '{}'",
                key
            )));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DiaryError::Persistence(format!(
                "failed to read '{}': {}",
                key, e
            ))),
        }
    }

    /// Writes to a temp file in the storage directory, then renames into place.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_quota(self.quota, key, value)?;
        let path = self.path_for(key)?;

        let write = || -> std::io::Result<()> {
            fs::create_dir_all(&self.dir)?;
            let tmp_path = self
                .dir
                .join(format!(".{}.podiary-tmp-{}", key, std::process::id()));
            fs::write(&tmp_path, value)?;
            if path.exists() {
                // rename does not overwrite on Windows
                fs::remove_file(&path)?;
            }
            fs::rename(&tmp_path, &path)
        };

        write().map_err(|e| DiaryError::Persistence(format!("failed to write '{}': {}", key, e)))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DiaryError::Persistence(format!(
                "failed to remove '{}': {}",
                key, e
            ))),
        }
    }
}

/// Volatile store, used for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    values: HashMap<String, String>,
    quota: Option<u64>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(mut self, quota: Option<u64>) -> Self {
        self.quota = quota;
        self
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_quota(self.quota, key, value)?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}
