//! Project path functions - single source of truth for content file layout.
//!
//! Lesson files live at `{content_dir}/{language}/lesson_{NNN}.json`, where
//! `NNN` is the zero-padded local lesson number produced by the locator.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//!
//! This allows running isolated server instances against separate content:
//! ```bash
//! DATA_DIR=data/test PORT=3001 cargo run
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Default lesson content directory
pub fn default_content_dir() -> String {
    format!("{}/lessons", data_dir())
}

/// Directory holding one language's lesson files
pub fn language_dir(content_dir: &Path, language: &str) -> PathBuf {
    content_dir.join(language)
}

/// File name for a local lesson number (7 -> "lesson_007.json")
pub fn lesson_file_name(local: u32) -> String {
    format!("lesson_{:03}.json", local)
}

/// Full path to a lesson file
pub fn lesson_path(content_dir: &Path, language: &str, local: u32) -> PathBuf {
    language_dir(content_dir, language).join(lesson_file_name(local))
}

/// Parse the local lesson number from a file stem (e.g., "lesson_007" -> Some(7))
///
/// Only the exact stem [`lesson_file_name`] produces is accepted, so every
/// number parsed here names a file that [`lesson_path`] can open.
pub fn parse_lesson_number(file_stem: &str) -> Option<u32> {
    let local: u32 = file_stem.strip_prefix("lesson_")?.parse().ok()?;
    let canonical = lesson_file_name(local);
    (canonical.strip_suffix(".json") == Some(file_stem)).then_some(local)
}

// ==================== Tests ====================
