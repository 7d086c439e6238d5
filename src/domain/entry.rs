//! Diary entries and their timestamp encoding

use crate::domain::ImageData;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// One captured photo with its note.
///
/// The `id` is the ISO-8601 form of the capture time and doubles as the
/// deduplication key. Entries are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: String,
    pub note: String,
    #[serde(rename = "imageUrl")]
    pub image: ImageData,
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
}

impl DiaryEntry {
    pub fn new(id: String, note: String, image: ImageData, timestamp: DateTime<Utc>) -> Self {
        DiaryEntry {
            id,
            note,
            image,
            timestamp,
        }
    }

    /// Build a fresh entry for a capture taken at `now`.
    ///
    /// The timestamp is truncated to milliseconds so that `id` and
    /// `timestamp` always describe the same instant.
    pub fn capture(note: String, image: ImageData, now: DateTime<Utc>) -> Self {
        let timestamp = now.trunc_subsecs(3);
        DiaryEntry {
            id: format_timestamp(&timestamp),
            note,
            image,
            timestamp,
        }
    }
}

/// Sort entries newest first. Stable, so equal timestamps keep their order.
pub fn sort_newest_first(entries: &mut [DiaryEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse any RFC 3339 timestamp into UTC
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Serde adapter writing timestamps with millisecond precision
pub mod iso8601 {
    use super::{format_timestamp, parse_timestamp};
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_timestamp(&s).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", s)))
    }
}
