//! Lesson content stored as static JSON files.
//!
//! The locator decides *which* file a global lesson id refers to; this module
//! reads, validates and lists those files.
//!
//! # Layout
//!
//! - `{content_dir}/{language}/lesson_{NNN}.json` - one lesson per file
//!
//! A lesson file carries the title and exercises only. Language, local
//! number and tier always come from the locator.

pub mod exercises;
pub mod lessons;

pub use exercises::{Exercise, ExerciseType};
pub use lessons::{list_lessons, load_lesson, Lesson, LessonFilter, LessonSummary, SortOrder};

use crate::locator::LocateError;

/// Content loading errors.
#[derive(Debug)]
pub enum ContentError {
    /// No lesson file at the given path
    NotFound(String),
    IoError(String, String),
    ParseError(String, String),
    /// Exercise failed validation (lesson path, reason)
    InvalidExercise(String, String),
    Locate(LocateError),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::NotFound(path) => write!(f, "Lesson file not found: {}", path),
            ContentError::IoError(path, err) => write!(f, "IO error reading {}: {}", path, err),
            ContentError::ParseError(path, err) => write!(f, "Parse error in {}: {}", path, err),
            ContentError::InvalidExercise(path, err) => {
                write!(f, "Invalid exercise in {}: {}", path, err)
            }
            ContentError::Locate(e) => write!(f, "{}", e),
        }
    }
}

impl ContentError {
    /// Returns a user-facing error message without exposing filesystem paths.
    pub fn user_message(&self) -> String {
        match self {
            ContentError::NotFound(_) => "Lesson not found".to_string(),
            ContentError::IoError(_, _) => "Failed to read lesson file".to_string(),
            ContentError::ParseError(_, _) => "Failed to parse lesson file".to_string(),
            ContentError::InvalidExercise(_, _) => {
                "Lesson contains an invalid exercise".to_string()
            }
            ContentError::Locate(e) => e.to_string(),
        }
    }
}

impl std::error::Error for ContentError {}

impl From<LocateError> for ContentError {
    fn from(e: LocateError) -> Self {
        ContentError::Locate(e)
    }
}
