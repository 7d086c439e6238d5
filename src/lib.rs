//! podiary - Photo diary
//!
//! Captures image frames annotated with a short note, keeps them in a local
//! key-value store and moves them in and out of zip archives.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::DiaryError;
