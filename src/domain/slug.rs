//! Filesystem-safe member names for archived images

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Placeholder used when a note slugs to nothing
pub const EMPTY_NOTE_SLUG: &str = "entry";

/// Extension of every image member
pub const IMAGE_EXTENSION: &str = "jpg";

fn non_alphanumeric_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[^a-zA-Z0-9]").unwrap())
}

/// Replace every non-ASCII-alphanumeric character with `_` and lower-case the result.
pub fn slugify(note: &str) -> String {
    let slug = non_alphanumeric_regex()
        .replace_all(note, "_")
        .to_lowercase();

    if slug.is_empty() {
        EMPTY_NOTE_SLUG.to_string()
    } else {
        slug
    }
}

/// Build `<slug>_<YYYY-MM-DD>_<HH-MM-SS>.jpg` for an entry.
///
/// Resolution is one second: two captures with the same note in the same
/// second map to the same name.
pub fn member_filename(note: &str, timestamp: &DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}.{}",
        slugify(note),
        timestamp.format("%Y-%m-%d"),
        timestamp.format("%H-%M-%S"),
        IMAGE_EXTENSION
    )
}

/// Derive the `n`th alternative for a colliding member name (`n >= 2`).
pub fn disambiguate(filename: &str, n: usize) -> String {
    let suffix = format!(".{}", IMAGE_EXTENSION);
    match filename.strip_suffix(&suffix) {
        Some(stem) => format!("{}_{}{}", stem, n, suffix),
        None => format!("{}_{}", filename, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_slugify_punctuation() {
        assert_eq!(slugify("Hello, World! 2024"), "hello__world__2024");
    }

    #[test]
    fn test_slugify_empty_uses_placeholder() {
        assert_eq!(slugify(""), "entry");
    }

    #[test]
    fn test_slugify_symbols_only_is_not_empty() {
        assert_eq!(slugify("!!"), "__");
    }

    #[test]
    fn test_slugify_non_ascii() {
        assert_eq!(slugify("Café día"), "caf__d_a");
    }

    #[test]
    fn test_member_filename() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            member_filename("Hello, World! 2024", &ts),
            "hello__world__2024_2024-03-09_07-05-01.jpg"
        );
    }

    #[test]
    fn test_member_filename_only_safe_chars() {
        let ts = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let name = member_filename("Ünïcode & <tags>/..", &ts);
        let stem = name.strip_suffix(".jpg").unwrap();
        assert!(stem
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'));
    }

    #[test]
    fn test_disambiguate() {
        assert_eq!(disambiguate("walk_2024-01-01_10-00-00.jpg", 2), "walk_2024-01-01_10-00-00_2.jpg");
        assert_eq!(disambiguate("odd", 3), "odd_3");
    }
}
