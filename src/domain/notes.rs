//! Grouping entries by note

use crate::domain::DiaryEntry;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// One distinct note with how often it was used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSummary {
    pub note: String,
    pub count: usize,
    pub last_timestamp: DateTime<Utc>,
}

/// Summarize entries per note, most recently used note first.
pub fn summarize_notes(entries: &[DiaryEntry]) -> Vec<NoteSummary> {
    let mut grouped: HashMap<&str, NoteSummary> = HashMap::new();

    for entry in entries {
        grouped
            .entry(entry.note.as_str())
            .and_modify(|summary| {
                summary.count += 1;
                if entry.timestamp > summary.last_timestamp {
                    summary.last_timestamp = entry.timestamp;
                }
            })
            .or_insert_with(|| NoteSummary {
                note: entry.note.clone(),
                count: 1,
                last_timestamp: entry.timestamp,
            });
    }

    let mut summaries: Vec<NoteSummary> = grouped.into_values().collect();
    summaries.sort_by(|a, b| {
        b.last_timestamp
            .cmp(&a.last_timestamp)
            .then_with(|| a.note.cmp(&b.note))
    });
    summaries
}
