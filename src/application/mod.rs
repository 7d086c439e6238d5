//! Application layer - Use cases and orchestration

pub mod camera;
pub mod capture;
pub mod export;
pub mod import;
pub mod init;
pub mod list_entries;
pub mod manage_config;

pub use camera::CameraService;
pub use capture::CaptureService;
pub use export::ExportService;
pub use import::{ImportReport, ImportService};
pub use manage_config::ConfigService;

use crate::error::Result;
use crate::infrastructure::FileSystemRepository;

/// Remove every entry from the diary, returning how many were dropped.
pub fn clear_entries(repository: &FileSystemRepository) -> Result<usize> {
    let mut store = repository.entry_store()?;
    let count = store.len();
    store.clear()?;
    log::info!("Cleared {} entries", count);
    Ok(count)
}
