//! Export/import behaviour of the archive codec against an in-memory store

use chrono::{DateTime, Duration, TimeZone, Utc};
use podiary::application::import::import_archive;
use podiary::domain::{DiaryEntry, ImageData};
use podiary::infrastructure::archive::{write_archive, IMAGE_FOLDER, METADATA_FILE};
use podiary::infrastructure::{EntryStore, MemoryKeyValueStore};
use podiary::DiaryError;
use std::collections::BTreeSet;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, day, hour, 0, 0).unwrap()
}

fn entry(note: &str, at: DateTime<Utc>) -> DiaryEntry {
    let image = ImageData::jpeg(format!("jpeg:{}:{}", note, at.timestamp_millis()).into_bytes());
    DiaryEntry::capture(note.to_string(), image, at)
}

fn store_with(entries: Vec<DiaryEntry>) -> EntryStore<MemoryKeyValueStore> {
    let mut store = EntryStore::load(MemoryKeyValueStore::new());
    store.append(entries).unwrap();
    store
}

fn export(store: &EntryStore<MemoryKeyValueStore>) -> Vec<u8> {
    let (cursor, _) = write_archive(store.entries(), Cursor::new(Vec::new())).unwrap();
    cursor.into_inner()
}

fn ids(store: &EntryStore<MemoryKeyValueStore>) -> BTreeSet<String> {
    store.entries().iter().map(|e| e.id.clone()).collect()
}

/// Copy every member except `skip` into a new archive
fn without_member(archive: &[u8], skip: &str) -> Vec<u8> {
    let mut source = ZipArchive::new(Cursor::new(archive)).unwrap();
    let mut out = ZipWriter::new(Cursor::new(Vec::new()));

    for i in 0..source.len() {
        let mut file = source.by_index(i).unwrap();
        let name = file.name().to_string();
        if name == skip {
            continue;
        }
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).unwrap();
        if name.ends_with('/') {
            out.add_directory(name, SimpleFileOptions::default()).unwrap();
        } else {
            out.start_file(name, SimpleFileOptions::default()).unwrap();
            out.write_all(&bytes).unwrap();
        }
    }

    out.finish().unwrap().into_inner()
}

#[test]
fn test_roundtrip_into_empty_store() {
    let original = store_with(vec![
        entry("Morning walk", ts(1, 8)),
        entry("Coffee", ts(2, 9)),
        entry("Hello, World! 2024", ts(3, 10)),
    ]);
    let archive = export(&original);

    let mut restored = EntryStore::load(MemoryKeyValueStore::new());
    let report = import_archive(&mut restored, Cursor::new(archive)).unwrap();

    assert_eq!(report.imported, 3);
    assert_eq!(ids(&restored), ids(&original));
    assert_eq!(restored.entries(), original.entries());
}

#[test]
fn test_import_twice_is_idempotent() {
    let archive = export(&store_with(vec![entry("a", ts(1, 8)), entry("b", ts(2, 8))]));
    let mut store = store_with(vec![entry("existing", ts(5, 8))]);

    import_archive(&mut store, Cursor::new(archive.clone())).unwrap();
    let after_first = store.entries().to_vec();

    let report = import_archive(&mut store, Cursor::new(archive)).unwrap();

    assert_eq!(report.imported, 0);
    assert_eq!(report.skipped_existing, 2);
    assert_eq!(store.len(), 3);
    assert_eq!(store.entries(), after_first.as_slice());
}

#[test]
fn test_missing_image_skips_only_that_entry() {
    let original = store_with(vec![
        entry("keep one", ts(1, 8)),
        entry("lose", ts(2, 8)),
        entry("keep two", ts(3, 8)),
    ]);
    let lost_member = format!("{}/lose_2024-04-02_08-00-00.jpg", IMAGE_FOLDER);
    let archive = without_member(&export(&original), &lost_member);

    let mut store = EntryStore::load(MemoryKeyValueStore::new());
    let report = import_archive(&mut store, Cursor::new(archive)).unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.missing_assets.len(), 1);
    assert!(report.missing_assets[0].contains("lose_2024-04-02_08-00-00.jpg"));
    let notes: Vec<&str> = store.entries().iter().map(|e| e.note.as_str()).collect();
    assert_eq!(notes, vec!["keep two", "keep one"]);
}

#[test]
fn test_missing_metadata_rejected_without_change() {
    let archive = without_member(
        &export(&store_with(vec![entry("a", ts(1, 8))])),
        METADATA_FILE,
    );
    let mut store = store_with(vec![entry("existing", ts(9, 8))]);
    let before = store.entries().to_vec();

    let err = import_archive(&mut store, Cursor::new(archive)).unwrap_err();

    assert!(matches!(err, DiaryError::ArchiveStructure(_)));
    assert!(err.to_string().contains("metadata.json not found"));
    assert_eq!(store.entries(), before.as_slice());
}

#[test]
fn test_missing_folder_rejected_without_change() {
    let mut out = ZipWriter::new(Cursor::new(Vec::new()));
    out.start_file(METADATA_FILE, SimpleFileOptions::default()).unwrap();
    out.write_all(b"[]").unwrap();
    let archive = out.finish().unwrap().into_inner();

    let mut store = store_with(vec![entry("existing", ts(9, 8))]);
    let err = import_archive(&mut store, Cursor::new(archive)).unwrap_err();

    assert!(err.to_string().contains("'PO Diario' folder not found"));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_member_names_are_slugged() {
    let archive = export(&store_with(vec![entry("Hello, World! 2024", ts(3, 10))]));

    let zip = ZipArchive::new(Cursor::new(archive)).unwrap();
    let image_names: Vec<&str> = zip
        .file_names()
        .filter(|n| n.starts_with("PO Diario/") && n.ends_with(".jpg"))
        .collect();

    assert_eq!(image_names, vec!["PO Diario/hello__world__2024_2024-04-03_10-00-00.jpg"]);
}

#[test]
fn test_older_imports_sort_after_existing() {
    let archive = export(&store_with(vec![entry("old a", ts(1, 8)), entry("old b", ts(2, 8))]));
    let mut store = store_with(vec![entry("new a", ts(20, 8)), entry("new b", ts(21, 8))]);

    import_archive(&mut store, Cursor::new(archive)).unwrap();

    let notes: Vec<&str> = store.entries().iter().map(|e| e.note.as_str()).collect();
    assert_eq!(notes, vec!["new b", "new a", "old b", "old a"]);
    assert!(store
        .entries()
        .windows(2)
        .all(|pair| pair[0].timestamp > pair[1].timestamp));
}

#[test]
fn test_same_note_same_second_survives_roundtrip() {
    let base = ts(4, 12);
    let original = store_with(vec![
        entry("burst", base + Duration::milliseconds(100)),
        entry("burst", base + Duration::milliseconds(600)),
    ]);

    let (cursor, report) = write_archive(original.entries(), Cursor::new(Vec::new())).unwrap();
    assert_eq!(report.renamed.len(), 1);

    let mut restored = EntryStore::load(MemoryKeyValueStore::new());
    import_archive(&mut restored, Cursor::new(cursor.into_inner())).unwrap();

    assert_eq!(restored.entries(), original.entries());
}
