//! Infrastructure layer - External I/O and persistence

pub mod archive;
pub mod config;
pub mod entry_store;
pub mod frame;
pub mod kv_store;
pub mod logging;
pub mod repository;

pub use archive::{ArchiveMetadataRecord, ExportReport, ImportOutcome};
pub use config::Config;
pub use entry_store::EntryStore;
pub use kv_store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use repository::{DiaryRepository, FileSystemRepository};
