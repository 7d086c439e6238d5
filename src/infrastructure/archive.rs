//! Zip archive codec for exporting and importing a diary
//!
//! Layout:
//! - `metadata.json`: pretty JSON array of [`ArchiveMetadataRecord`]
//! - `PO Diario/<slug>_<date>_<time>.jpg`: one image member per entry
//!
//! Import is asymmetric on failure: a missing or malformed `metadata.json`
//! or a missing image folder aborts the whole import, while a record whose
//! image member is absent is skipped.

use crate::domain::{format_timestamp, member_filename, parse_timestamp, DiaryEntry, ImageData};
use crate::domain::slug::disambiguate;
use crate::error::{DiaryError, Result};
use chrono::SubsecRound;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::{Read, Seek, Write};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Name of the metadata document at the archive root
pub const METADATA_FILE: &str = "metadata.json";

/// Folder holding the image members
pub const IMAGE_FOLDER: &str = "PO Diario";

/// Per-entry metadata stored in `metadata.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveMetadataRecord {
    pub id: String,
    pub note: String,
    pub timestamp: String,
    pub filename: String,
}

/// A member name that had to change to avoid overwriting an earlier one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedMember {
    pub id: String,
    pub original: String,
    pub actual: String,
}

/// Summary of a finished export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub entries: usize,
    pub renamed: Vec<RenamedMember>,
}

/// Result of reading an archive, before anything is merged
#[derive(Debug, Default)]
pub struct ImportOutcome {
    /// Entries ready to be merged, in archive order
    pub entries: Vec<DiaryEntry>,
    /// Ids skipped because they were already known
    pub skipped_existing: Vec<String>,
    /// Records whose image member is absent
    pub missing_assets: Vec<DiaryError>,
    /// Descriptions of records that do not match the metadata schema
    pub malformed: Vec<String>,
}

fn image_member_path(filename: &str) -> String {
    format!("{}/{}", IMAGE_FOLDER, filename)
}

/// Write `entries` as a zip archive into `writer`.
///
/// Members that would share a name get `_2`, `_3`, ... appended so no image
/// is overwritten; the metadata records the name actually used.
pub fn write_archive<W: Write + Seek>(entries: &[DiaryEntry], writer: W) -> Result<(W, ExportReport)> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(writer);
    let mut report = ExportReport::default();
    let mut used = HashSet::new();
    let mut metadata = Vec::with_capacity(entries.len());

    zip.add_directory(format!("{}/", IMAGE_FOLDER), options)?;

    for entry in entries {
        let original = member_filename(&entry.note, &entry.timestamp);
        let mut filename = original.clone();
        let mut n = 2;
        while !used.insert(filename.clone()) {
            filename = disambiguate(&original, n);
            n += 1;
        }

        if filename != original {
            log::warn!(
                "Member name {} already used, storing entry {} as {}",
                original,
                entry.id,
                filename
            );
            report.renamed.push(RenamedMember {
                id: entry.id.clone(),
                original,
                actual: filename.clone(),
            });
        }

        zip.start_file(image_member_path(&filename), options)?;
        zip.write_all(entry.image.bytes())?;

        metadata.push(ArchiveMetadataRecord {
            id: entry.id.clone(),
            note: entry.note.clone(),
            timestamp: format_timestamp(&entry.timestamp),
            filename,
        });
    }

    zip.start_file(METADATA_FILE, options)?;
    zip.write_all(serde_json::to_string_pretty(&metadata)?.as_bytes())?;

    report.entries = metadata.len();
    let writer = zip.finish()?;
    Ok((writer, report))
}

/// Read an archive, keeping only entries whose id is not in `existing`.
pub fn read_archive<R: Read + Seek>(reader: R, existing: &HashSet<String>) -> Result<ImportOutcome> {
    let mut zip = ZipArchive::new(reader)
        .map_err(|e| DiaryError::ArchiveStructure(format!("not a zip archive ({}).", e)))?;

    let records = read_metadata(&mut zip)?;

    let folder_prefix = format!("{}/", IMAGE_FOLDER);
    if !zip.file_names().any(|name| name.starts_with(&folder_prefix)) {
        return Err(DiaryError::ArchiveStructure(format!(
            "'{}' folder not found.",
            IMAGE_FOLDER
        )));
    }

    let mut outcome = ImportOutcome::default();
    let mut accepted: HashSet<String> = HashSet::new();

    for (index, value) in records.into_iter().enumerate() {
        let record: ArchiveMetadataRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping metadata record #{}: {}", index, e);
                outcome.malformed.push(format!("record #{}: {}", index, e));
                continue;
            }
        };

        if existing.contains(&record.id) || accepted.contains(&record.id) {
            outcome.skipped_existing.push(record.id);
            continue;
        }

        let Some(timestamp) = parse_timestamp(&record.timestamp).map(|t| t.trunc_subsecs(3)) else {
            log::warn!("Skipping entry {}: invalid timestamp {}", record.id, record.timestamp);
            outcome
                .malformed
                .push(format!("entry {}: invalid timestamp '{}'", record.id, record.timestamp));
            continue;
        };

        if record.filename.is_empty() || record.filename.contains('/') {
            log::warn!("Skipping entry {}: invalid filename {:?}", record.id, record.filename);
            outcome
                .malformed
                .push(format!("entry {}: invalid filename '{}'", record.id, record.filename));
            continue;
        }

        let bytes = match read_member(&mut zip, &image_member_path(&record.filename))? {
            Some(bytes) => bytes,
            None => {
                let err = DiaryError::MissingAsset {
                    id: record.id,
                    filename: record.filename,
                };
                log::warn!("{}", err);
                outcome.missing_assets.push(err);
                continue;
            }
        };

        accepted.insert(record.id.clone());
        outcome.entries.push(DiaryEntry::new(
            record.id,
            record.note,
            ImageData::jpeg(bytes),
            timestamp,
        ));
    }

    Ok(outcome)
}

fn read_metadata<R: Read + Seek>(zip: &mut ZipArchive<R>) -> Result<Vec<serde_json::Value>> {
    let content = match zip.by_name(METADATA_FILE) {
        Ok(mut file) => {
            let mut content = String::new();
            file.read_to_string(&mut content).map_err(|_| corrupted_metadata())?;
            content
        }
        Err(ZipError::FileNotFound) => {
            return Err(DiaryError::ArchiveStructure(format!(
                "{} not found.",
                METADATA_FILE
            )))
        }
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_str(&content) {
        Ok(serde_json::Value::Array(records)) => Ok(records),
        _ => Err(corrupted_metadata()),
    }
}

fn corrupted_metadata() -> DiaryError {
    DiaryError::ArchiveStructure(format!("{} is corrupted.", METADATA_FILE))
}

fn read_member<R: Read + Seek>(zip: &mut ZipArchive<R>, name: &str) -> Result<Option<Vec<u8>>> {
    match zip.by_name(name) {
        Ok(mut file) => {
            // The declared size comes from the archive and is not trusted
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            Ok(Some(bytes))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
