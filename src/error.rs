//! Error types for podiary

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for podiary application
#[derive(Debug, Error)]
pub enum DiaryError {
    #[error("Not a podiary directory: {0}")]
    NotDiaryDirectory(PathBuf),

    /// Reading or writing the local key-value store failed
    #[error("Storage error: {0}")]
    Persistence(String),

    /// A required archive member is missing or malformed
    #[error("Invalid Diary Archive: {0}")]
    ArchiveStructure(String),

    /// An image referenced by archive metadata is absent
    #[error("Image file not found for entry {id}: {filename}")]
    MissingAsset { id: String, filename: String },

    #[error("Please enter a note before capturing a photo.")]
    EmptyNote,

    #[error("The diary has no entries to export")]
    EmptyDiary,

    #[error("An entry with id {0} already exists")]
    DuplicateEntry(String),

    #[error("Frame error: {0}")]
    Frame(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl DiaryError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DiaryError::NotDiaryDirectory(_) => 2,
            DiaryError::ArchiveStructure(_) | DiaryError::Zip(_) => 3,
            DiaryError::EmptyNote | DiaryError::Frame(_) => 4,
            DiaryError::Persistence(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DiaryError::NotDiaryDirectory(path) => {
                format!(
                    "Not a podiary directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'podiary init' in this directory to create a new diary\n\
                    • Navigate to an existing podiary directory\n\
                    • Set PODIARY_ROOT environment variable to your diary path",
                    path.display()
                )
            }
            DiaryError::ArchiveStructure(_) | DiaryError::Zip(_) => {
                format!(
                    "{}\n\n\
                    The file does not look like an archive exported by podiary.\n\
                    Expected a zip containing metadata.json and a 'PO Diario' folder.",
                    self
                )
            }
            DiaryError::EmptyNote => {
                format!(
                    "{}\n\n\
                    Example: podiary capture --note \"Morning walk\" frame.png",
                    self
                )
            }
            DiaryError::EmptyDiary => {
                format!(
                    "{}\n\n\
                    Capture a photo first: podiary capture --note <NOTE> <FRAME>",
                    self
                )
            }
            DiaryError::Persistence(msg) => {
                if msg.contains("quota") {
                    format!(
                        "{}\n\n\
                        Suggestions:\n\
                        • Export your diary and clear old entries: podiary export && podiary clear --yes\n\
                        • Raise or remove the limit: podiary config storage_quota none",
                        self
                    )
                } else {
                    self.to_string()
                }
            }
            DiaryError::Config(msg) => {
                if msg.contains("jpeg_quality") {
                    format!(
                        "{}\n\n\
                        Valid range: 1-100\n\
                        Example: podiary config jpeg_quality 85",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DiaryError
pub type Result<T> = std::result::Result<T, DiaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_diary_directory_suggestion() {
        let err = DiaryError::NotDiaryDirectory(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("podiary init"));
        assert!(msg.contains("PODIARY_ROOT"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_archive_structure_message() {
        let err = DiaryError::ArchiveStructure("metadata.json not found.".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid Diary Archive: metadata.json not found."
        );
        let msg = err.display_with_suggestions();
        assert!(msg.contains("PO Diario"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_missing_asset_message() {
        let err = DiaryError::MissingAsset {
            id: "2024-01-01T00:00:00.000Z".to_string(),
            filename: "walk_2024-01-01_00-00-00.jpg".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-01-01T00:00:00.000Z"));
        assert!(msg.contains("walk_2024-01-01_00-00-00.jpg"));
    }

    #[test]
    fn test_quota_suggestions() {
        let err = DiaryError::Persistence("quota exceeded".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("podiary export"));
        assert!(msg.contains("storage_quota"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(DiaryError::NotDiaryDirectory(PathBuf::new()).exit_code(), 2);
        assert_eq!(DiaryError::EmptyNote.exit_code(), 4);
        assert_eq!(DiaryError::Persistence(String::new()).exit_code(), 5);
        assert_eq!(DiaryError::EmptyDiary.exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = DiaryError::Frame("unsupported format".to_string());
        let msg = err.display_with_suggestions();
        assert_eq!(msg, "Frame error: unsupported format");
    }
}
