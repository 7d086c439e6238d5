//! Domain layer - Business logic and domain models

pub mod entry;
pub mod image;
pub mod notes;
pub mod slug;

pub use entry::{format_timestamp, parse_timestamp, sort_newest_first, DiaryEntry};
pub use image::{ImageData, JPEG_MIME};
pub use notes::{summarize_notes, NoteSummary};
pub use slug::{member_filename, slugify};
