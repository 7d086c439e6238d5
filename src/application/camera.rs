//! Remembered camera device selection

use crate::error::{DiaryError, Result};
use crate::infrastructure::{FileSystemRepository, KeyValueStore};

/// Storage key holding the last selected camera device id
pub const SELECTED_DEVICE_KEY: &str = "photoDiarySelectedDeviceId";

/// Get the selected device id, if any
pub fn selected_device<S: KeyValueStore>(store: &S) -> Result<Option<String>> {
    Ok(store
        .get(SELECTED_DEVICE_KEY)?
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty()))
}

/// Remember `device_id` as the selected camera
pub fn select_device<S: KeyValueStore>(store: &mut S, device_id: &str) -> Result<()> {
    let device_id = device_id.trim();
    if device_id.is_empty() {
        return Err(DiaryError::Config(
            "Camera device id must not be empty".to_string(),
        ));
    }
    store.set(SELECTED_DEVICE_KEY, device_id)
}

/// Forget the selected camera
pub fn reset_device<S: KeyValueStore>(store: &mut S) -> Result<()> {
    store.remove(SELECTED_DEVICE_KEY)
}

/// Service wrapping camera selection for a diary on disk
pub struct CameraService {
    repository: FileSystemRepository,
}

impl CameraService {
    pub fn new(repository: FileSystemRepository) -> Self {
        CameraService { repository }
    }

    pub fn get(&self) -> Result<Option<String>> {
        selected_device(&self.repository.key_value_store()?)
    }

    pub fn set(&self, device_id: &str) -> Result<()> {
        select_device(&mut self.repository.key_value_store()?, device_id)
    }

    pub fn reset(&self) -> Result<()> {
        reset_device(&mut self.repository.key_value_store()?)
    }
}
