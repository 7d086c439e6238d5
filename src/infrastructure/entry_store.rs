//! The authoritative, deduplicated entry collection

use crate::domain::{sort_newest_first, DiaryEntry};
use crate::error::Result;
use crate::infrastructure::KeyValueStore;
use std::collections::HashSet;

/// Storage key holding the JSON array of entries
pub const ENTRIES_KEY: &str = "photoDiaryEntries";

/// In-memory entry collection mirrored to a [`KeyValueStore`].
///
/// Single writer: every mutation rewrites the whole persisted value.
#[derive(Debug)]
pub struct EntryStore<S: KeyValueStore> {
    store: S,
    entries: Vec<DiaryEntry>,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Load entries from `store`.
    ///
    /// Never fails: absent data yields an empty collection, and unreadable or
    /// malformed data is discarded (the persisted value is removed).
    pub fn load(mut store: S) -> Self {
        let entries = match store.get(ENTRIES_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<DiaryEntry>>(&json) {
                Ok(entries) => dedup_and_sort(entries),
                Err(e) => {
                    log::warn!("Error loading entries from storage: {}", e);
                    discard_corrupted(&mut store);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Error loading entries from storage: {}", e);
                discard_corrupted(&mut store);
                Vec::new()
            }
        };

        log::debug!("Loaded {} entries", entries.len());
        EntryStore { store, entries }
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn ids(&self) -> HashSet<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    /// Access the backing key-value store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Set the collection and persist it.
    ///
    /// The in-memory collection keeps the new value even when persisting
    /// fails; the error is returned for reporting.
    pub fn replace(&mut self, entries: Vec<DiaryEntry>) -> Result<()> {
        self.entries = entries;
        self.persist()
    }

    /// Merge `new_entries`, re-sort newest first and persist.
    ///
    /// Entries whose id is already present are dropped. Returns the number of
    /// entries actually added; a persist failure is returned as an error after
    /// the in-memory merge has happened.
    pub fn append(&mut self, new_entries: Vec<DiaryEntry>) -> Result<usize> {
        let mut merged = self.entries.clone();
        let mut seen = self.ids();
        let mut added = 0;

        for entry in new_entries {
            if seen.insert(entry.id.clone()) {
                merged.push(entry);
                added += 1;
            } else {
                log::debug!("Skipping duplicate entry {}", entry.id);
            }
        }

        sort_newest_first(&mut merged);
        self.replace(merged)?;
        Ok(added)
    }

    /// Drop every entry and the persisted value
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.store.remove(ENTRIES_KEY)
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.set(ENTRIES_KEY, &json).inspect_err(|e| {
            log::error!("Error saving entries to storage: {}", e);
        })
    }
}

fn discard_corrupted<S: KeyValueStore>(store: &mut S) {
    if let Err(e) = store.remove(ENTRIES_KEY) {
        log::error!("Failed to clear corrupted entries: {}", e);
    }
}

fn dedup_and_sort(entries: Vec<DiaryEntry>) -> Vec<DiaryEntry> {
    let mut seen = HashSet::new();
    let mut unique: Vec<DiaryEntry> = entries
        .into_iter()
        .filter(|e| seen.insert(e.id.clone()))
        .collect();
    sort_newest_first(&mut unique);
    unique
}
