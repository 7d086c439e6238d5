//! List entries and note summaries

use crate::domain::{summarize_notes, DiaryEntry, NoteSummary};
use crate::error::Result;
use crate::infrastructure::FileSystemRepository;

/// Entries newest first, optionally restricted to one note and truncated to `limit`.
pub fn filter_entries(entries: &[DiaryEntry], note: Option<&str>, limit: Option<usize>) -> Vec<DiaryEntry> {
    entries
        .iter()
        .filter(|e| note.is_none_or(|n| e.note == n))
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

/// List entries of the diary.
pub fn list_entries(
    repository: &FileSystemRepository,
    note: Option<&str>,
    limit: Option<usize>,
) -> Result<Vec<DiaryEntry>> {
    let store = repository.entry_store()?;
    Ok(filter_entries(store.entries(), note, limit))
}

/// Distinct notes, most recently used first.
pub fn list_notes(repository: &FileSystemRepository) -> Result<Vec<NoteSummary>> {
    let store = repository.entry_store()?;
    Ok(summarize_notes(store.entries()))
}
