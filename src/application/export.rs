//! Export use case

use crate::error::{DiaryError, Result};
use crate::infrastructure::archive::write_archive;
use crate::infrastructure::{DiaryRepository, EntryStore, ExportReport, FileSystemRepository, KeyValueStore};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Service for exporting the diary to a zip archive
pub struct ExportService {
    repository: FileSystemRepository,
}

impl ExportService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ExportService { repository }
    }

    /// Export every entry to `output`, or to the configured archive name in
    /// the current directory. Returns the archive path and the report.
    pub fn execute(&self, output: Option<PathBuf>) -> Result<(PathBuf, ExportReport)> {
        let path = match output {
            Some(path) => path,
            None => PathBuf::from(self.repository.load_config()?.archive_name),
        };

        let store = self.repository.entry_store()?;
        let report = export_to_path(&store, &path)?;
        log::info!("Exported {} entries to {}", report.entries, path.display());
        Ok((path, report))
    }
}

/// Write the archive for `store` to `path`.
///
/// The archive is assembled in a temp file next to `path` and renamed into
/// place, so a failed export never leaves a partial file behind.
pub fn export_to_path<S: KeyValueStore>(store: &EntryStore<S>, path: &Path) -> Result<ExportReport> {
    if store.is_empty() {
        return Err(DiaryError::EmptyDiary);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_name = format!(
        ".{}.podiary-tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("archive.zip"),
        std::process::id()
    );
    let tmp_path = path.with_file_name(tmp_name);

    let written = write_to_file(store, &tmp_path);
    let report = match written {
        Ok(report) => report,
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            log::error!("Error creating zip file: {}", e);
            return Err(e);
        }
    };

    if path.exists() {
        fs::remove_file(path)?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(report)
}

fn write_to_file<S: KeyValueStore>(store: &EntryStore<S>, path: &Path) -> Result<ExportReport> {
    let file = File::create(path)?;
    let (mut writer, report) = write_archive(store.entries(), BufWriter::new(file))?;
    writer.flush()?;
    let file = writer.into_inner().map_err(|e| DiaryError::Io(e.into_error()))?;
    file.sync_all()?;
    Ok(report)
}
