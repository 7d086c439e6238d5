//! Output formatting utilities

use crate::application::ImportReport;
use crate::domain::{DiaryEntry, NoteSummary};
use crate::infrastructure::ExportReport;
use std::path::Path;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format entries for display, one per line
pub fn format_entry_list(entries: &[DiaryEntry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!(
            "{}  {}  ({} KB)\n",
            entry.timestamp.format(DISPLAY_FORMAT),
            entry.note,
            entry.image.len().div_ceil(1024)
        ));
    }
    output
}

/// Format note summaries for display
pub fn format_note_summaries(summaries: &[NoteSummary]) -> String {
    if summaries.is_empty() {
        return "No notes found".to_string();
    }

    let mut output = String::new();
    for summary in summaries {
        let unit = if summary.count == 1 { "photo" } else { "photos" };
        output.push_str(&format!(
            "{}  ({} {}, last {})\n",
            summary.note,
            summary.count,
            unit,
            summary.last_timestamp.format(DISPLAY_FORMAT)
        ));
    }
    output
}

pub fn format_export_report(path: &Path, report: &ExportReport) -> String {
    let mut output = format!("Exported {} entries to {}\n", report.entries, path.display());
    for renamed in &report.renamed {
        output.push_str(&format!(
            "Renamed {} to {} (entry {})\n",
            renamed.original, renamed.actual, renamed.id
        ));
    }
    output
}

pub fn format_import_report(report: &ImportReport) -> String {
    let mut output = format!("Imported {} new entries\n", report.imported);
    if report.skipped_existing > 0 {
        output.push_str(&format!(
            "Skipped {} entries already in the diary\n",
            report.skipped_existing
        ));
    }
    for message in report.missing_assets.iter().chain(&report.malformed) {
        output.push_str(&format!("Skipped: {}\n", message));
    }
    output
}
