//! Import use case

use crate::error::Result;
use crate::infrastructure::archive::read_archive;
use crate::infrastructure::{EntryStore, FileSystemRepository, KeyValueStore};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// What an import did to the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Entries added to the store
    pub imported: usize,
    /// Records whose id was already present
    pub skipped_existing: usize,
    /// One message per record whose image was missing
    pub missing_assets: Vec<String>,
    /// One message per record that did not match the metadata schema
    pub malformed: Vec<String>,
}

/// Service for importing a previously exported archive
pub struct ImportService {
    repository: FileSystemRepository,
}

impl ImportService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ImportService { repository }
    }

    pub fn execute(&self, archive: &Path) -> Result<ImportReport> {
        let file = File::open(archive)?;
        let mut store = self.repository.entry_store()?;
        let report = import_archive(&mut store, BufReader::new(file))?;
        log::info!(
            "Imported {} entries from {}",
            report.imported,
            archive.display()
        );
        Ok(report)
    }
}

/// Read an archive and merge its new entries into `store`.
///
/// Structural problems abort before the store is touched. Records with a
/// missing image or a malformed shape are skipped and reported.
pub fn import_archive<S: KeyValueStore, R: Read + Seek>(
    store: &mut EntryStore<S>,
    reader: R,
) -> Result<ImportReport> {
    let outcome = read_archive(reader, &store.ids())?;

    let report = ImportReport {
        imported: outcome.entries.len(),
        skipped_existing: outcome.skipped_existing.len(),
        missing_assets: outcome.missing_assets.iter().map(|e| e.to_string()).collect(),
        malformed: outcome.malformed,
    };

    if !outcome.entries.is_empty() {
        store.append(outcome.entries)?;
    }
    Ok(report)
}
