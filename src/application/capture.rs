//! Capture use case

use crate::domain::{DiaryEntry, ImageData};
use crate::error::{DiaryError, Result};
use crate::infrastructure::frame::capture_frame;
use crate::infrastructure::{DiaryRepository, EntryStore, FileSystemRepository, KeyValueStore};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Service for capturing new entries
pub struct CaptureService {
    repository: FileSystemRepository,
}

impl CaptureService {
    pub fn new(repository: FileSystemRepository) -> Self {
        CaptureService { repository }
    }

    /// Capture the frame at `frame` with `note` and persist the new entry.
    pub fn execute(&self, note: &str, frame: &Path) -> Result<DiaryEntry> {
        // Checked before touching the frame so a blank note never reads it
        if note.trim().is_empty() {
            return Err(DiaryError::EmptyNote);
        }

        let config = self.repository.load_config()?;
        let image = capture_frame(frame, config.jpeg_quality)?;
        let mut store = self.repository.entry_store()?;

        record_capture(&mut store, note, image, Utc::now())
    }
}

/// Create an entry from an encoded frame and append it to `store`.
///
/// The note is stored trimmed. A capture whose id (its millisecond timestamp)
/// is already present is rejected.
pub fn record_capture<S: KeyValueStore>(
    store: &mut EntryStore<S>,
    note: &str,
    image: ImageData,
    now: DateTime<Utc>,
) -> Result<DiaryEntry> {
    let note = note.trim();
    if note.is_empty() {
        return Err(DiaryError::EmptyNote);
    }

    let entry = DiaryEntry::capture(note.to_string(), image, now);
    if store.contains(&entry.id) {
        return Err(DiaryError::DuplicateEntry(entry.id));
    }

    store.append(vec![entry.clone()])?;
    log::info!("Captured entry {} ({})", entry.id, entry.note);
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryKeyValueStore;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 4, 18, 30, 0).unwrap()
    }

    #[test]
    fn test_record_capture_adds_newest_first() {
        let mut store = EntryStore::load(MemoryKeyValueStore::new());

        record_capture(&mut store, "first", ImageData::jpeg(vec![1]), now()).unwrap();
        let second = record_capture(
            &mut store,
            "  second  ",
            ImageData::jpeg(vec![2]),
            now() + chrono::Duration::seconds(1),
        )
        .unwrap();

        assert_eq!(second.note, "second");
        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[0].id, second.id);
    }

    #[test]
    fn test_record_capture_requires_note() {
        let mut store = EntryStore::load(MemoryKeyValueStore::new());

        let err = record_capture(&mut store, "   ", ImageData::jpeg(vec![1]), now()).unwrap_err();

        assert!(matches!(err, DiaryError::EmptyNote));
        assert!(store.is_empty());
    }

    #[test]
    fn test_record_capture_same_millisecond_rejected() {
        let mut store = EntryStore::load(MemoryKeyValueStore::new());
        record_capture(&mut store, "a", ImageData::jpeg(vec![1]), now()).unwrap();

        let err = record_capture(&mut store, "b", ImageData::jpeg(vec![2]), now()).unwrap_err();

        assert!(matches!(err, DiaryError::DuplicateEntry(_)));
        assert_eq!(store.len(), 1);
    }
}
